//! Database module: storage for credentials and bearer tokens.
//!
//! Layout:
//! - `schema.rs`: SQL DDL for initializing the database
//! - `models.rs`: Rust structs mirroring DB rows
//! - `sqlite.rs`: pool construction and schema bootstrap
//! - `credentials.rs` / `tokens.rs`: stores over the shared pool

pub mod credentials;
pub mod models;
pub mod schema;
pub mod sqlite;
pub mod tokens;

pub use credentials::CredentialStore;
pub use models::TokenRecord;
pub use sqlite::SqlitePool;
pub use tokens::TokenStore;

use crate::error::AuthError;
use std::path::Path;

/// Open the database at `path` and make sure the schema exists.
pub async fn spawn(path: &Path) -> Result<SqlitePool, AuthError> {
    let pool = sqlite::connect(path).await?;
    sqlite::init_schema(&pool).await?;
    Ok(pool)
}
