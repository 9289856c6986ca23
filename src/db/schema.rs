//! SQL DDL for initializing the credential and token storage.
//! Every statement is idempotent and runs on each startup.

/// SQLite schema with:
/// - `users`: `username` PRIMARY KEY, Argon2 PHC string in `password_hash`
/// - `tokens`: `token` PRIMARY KEY, owning `username` (no foreign key),
///   `expires_at` as unix seconds
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    username TEXT PRIMARY KEY,
    password_hash TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tokens (
    token TEXT PRIMARY KEY,
    username TEXT NOT NULL,
    expires_at INTEGER NOT NULL
);
"#;
