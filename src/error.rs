use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum AuthError {
    #[error("username and password required")]
    InvalidRequest,

    /// Unknown user and wrong password both land here.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("unauthenticated")]
    Unauthenticated,

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] SqlxError),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(e: argon2::password_hash::Error) -> Self {
        AuthError::PasswordHash(e.to_string())
    }
}

impl From<figment::Error> for AuthError {
    fn from(e: figment::Error) -> Self {
        AuthError::Config(e.to_string())
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(e: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("blocking task failed: {e}"))
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            AuthError::InvalidRequest => (StatusCode::BAD_REQUEST, "username and password required"),
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid credentials"),
            // Plain text: consumed by gateway auth_request checks, not API clients.
            AuthError::Unauthenticated => {
                return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
            }
            AuthError::StorageUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "storage unavailable")
            }
            AuthError::PasswordHash(_)
            | AuthError::Internal(_)
            | AuthError::Config(_)
            | AuthError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
        };
        (status, Json(ApiErrorResponse { error })).into_response()
    }
}

/// JSON error body returned by the login and storage failure paths.
#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: &'static str,
}
