use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};

use crate::db::TokenRecord;
use crate::error::AuthError;
use crate::server::router::AuthState;

/// Read the `Authorization` header as text; non-UTF-8 values count as absent.
pub fn authorization_header(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

/// Extractor that only succeeds for a known, unexpired bearer token.
///
/// Every rejection renders the same plain `401 Unauthorized`, except storage
/// failures, which surface as server errors.
#[derive(Debug, Clone)]
pub struct RequireBearer(pub TokenRecord);

impl FromRequestParts<AuthState> for RequireBearer {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AuthState,
    ) -> Result<Self, Self::Rejection> {
        let header = authorization_header(parts);
        let record = state.tokens.verify(header).await?;
        Ok(Self(record))
    }
}
