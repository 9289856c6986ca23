use crate::config::Config;
use crate::db::{CredentialStore, SqlitePool, TokenRecord, TokenStore};
use crate::error::AuthError;
use crate::types::auth::LoginResponse;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

/// Credential check + token mint, and token verification.
///
/// Holds no mutable state. Storage connections are checked out per query and
/// returned to the pool on every exit path; none is held while a password
/// hash is being verified.
#[derive(Clone)]
pub struct TokenService {
    credentials: CredentialStore,
    tokens: TokenStore,
    token_ttl: u64,
}

impl TokenService {
    pub fn new(pool: SqlitePool, cfg: &Config) -> Self {
        Self {
            credentials: CredentialStore::new(pool.clone()),
            tokens: TokenStore::new(pool),
            token_ttl: cfg.token_ttl,
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let username = username.trim();
        if username.is_empty() || password.trim().is_empty() {
            return Err(AuthError::InvalidRequest);
        }

        let verified = self
            .credentials
            .verify(username, password)
            .await
            .inspect_err(log_failure)?;
        if !verified {
            warn!(username, "login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self
            .tokens
            .issue(username, self.token_ttl, Utc::now())
            .await
            .inspect_err(log_failure)?;

        info!(username, expires_at = %issued.expires_at, "token issued");
        Ok(LoginResponse::bearer(issued.token, self.token_ttl))
    }

    /// Validate a raw `Authorization` header value.
    pub async fn verify(&self, authorization: Option<&str>) -> Result<TokenRecord, AuthError> {
        self.verify_at(authorization, Utc::now()).await
    }

    pub(crate) async fn verify_at(
        &self,
        authorization: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<TokenRecord, AuthError> {
        let Some(token) = authorization.and_then(parse_bearer) else {
            debug!("verify rejected: missing or malformed authorization header");
            return Err(AuthError::Unauthenticated);
        };

        let record = self.tokens.lookup(token).await.inspect_err(log_failure)?;

        match record {
            Some(rec) if rec.is_valid_at(now) => Ok(rec),
            Some(rec) => {
                debug!(username = %rec.username, "verify rejected: token expired");
                Err(AuthError::Unauthenticated)
            }
            None => {
                debug!("verify rejected: unknown token");
                Err(AuthError::Unauthenticated)
            }
        }
    }
}

/// Extract the token from `Bearer <token>`; scheme match is case-insensitive.
pub fn parse_bearer(header: &str) -> Option<&str> {
    const SCHEME: &str = "bearer ";
    let prefix = header.get(..SCHEME.len())?;
    if !prefix.eq_ignore_ascii_case(SCHEME) {
        return None;
    }
    let token = header[SCHEME.len()..].trim();
    (!token.is_empty()).then_some(token)
}

/// Store calls only fail on storage, hashing or task faults, never on bad input.
fn log_failure(err: &AuthError) {
    error!(error = %err, "token service failure");
}
