use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::debug;

use crate::error::AuthError;
use crate::middleware::auth::RequireBearer;
use crate::server::router::AuthState;
use crate::types::auth::{HealthResponse, LoginRequest, LoginResponse};

/// GET /health -> liveness only; touches no dependency.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// POST /login -> verifies credentials and mints a bearer token.
pub async fn login(
    State(state): State<AuthState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AuthError> {
    let Json(req) = payload.map_err(|rejection| {
        debug!(error = %rejection, "login body rejected");
        AuthError::InvalidRequest
    })?;

    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();
    let resp = state.tokens.login(&username, &password).await?;
    Ok(Json(resp))
}

/// GET /verify -> 200 "OK" for a live bearer token; gateway auth_request target.
pub async fn verify(RequireBearer(_record): RequireBearer) -> &'static str {
    "OK"
}
