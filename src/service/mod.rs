pub mod bootstrap;
pub mod password;
pub mod token_service;

pub use bootstrap::{bootstrap, seed_default_account};
pub use token_service::{TokenService, parse_bearer};
