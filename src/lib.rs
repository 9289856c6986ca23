pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod service;
pub mod types;

pub use config::Config;
pub use error::AuthError;
pub use service::TokenService;
