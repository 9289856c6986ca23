use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers::auth::{health, login, verify};
use crate::service::TokenService;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: TokenService,
}

impl AuthState {
    pub fn new(tokens: TokenService) -> Self {
        Self { tokens }
    }
}

pub fn auth_router(state: AuthState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/verify", get(verify))
        .with_state(state)
}
