use crate::db::models::{DbToken, TokenRecord};
use crate::db::sqlite::SqlitePool;
use crate::error::AuthError;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use rand::RngCore;

/// Random bytes per token (256 bits).
pub const TOKEN_BYTES: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Token → (username, expiry) storage.
#[derive(Clone)]
pub struct TokenStore {
    pool: SqlitePool,
}

impl TokenStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Mint and persist a token for `username` valid for `ttl_seconds` after `issued_at`.
    pub async fn issue(
        &self,
        username: &str,
        ttl_seconds: u64,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        let token = generate_token();
        let ttl = i64::try_from(ttl_seconds)
            .map_err(|_| AuthError::Internal(format!("token ttl out of range: {ttl_seconds}")))?;
        let expires_at = issued_at.timestamp().saturating_add(ttl);

        sqlx::query("INSERT INTO tokens (token, username, expires_at) VALUES (?, ?, ?)")
            .bind(&token)
            .bind(username)
            .bind(expires_at)
            .execute(&self.pool)
            .await?;

        Ok(IssuedToken {
            token,
            expires_at: DateTime::from_timestamp(expires_at, 0).unwrap_or(DateTime::<Utc>::MAX_UTC),
        })
    }

    pub async fn lookup(&self, token: &str) -> Result<Option<TokenRecord>, AuthError> {
        let row = sqlx::query_as::<_, DbToken>(
            "SELECT token, username, expires_at FROM tokens WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(TokenRecord::from))
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{cleanup, temp_pool};
    use chrono::Duration;

    #[test]
    fn tokens_are_urlsafe_unpadded_and_distinct() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 43);
        assert_ne!(a, b);
        assert!(
            a.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[tokio::test]
    async fn issue_then_lookup() {
        let (pool, path) = temp_pool("token-issue").await;
        let store = TokenStore::new(pool.clone());

        let now = Utc::now();
        let issued = store.issue("vip", 86_400, now).await.expect("issue");
        assert_eq!(issued.expires_at.timestamp(), now.timestamp() + 86_400);

        let rec = store
            .lookup(&issued.token)
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(rec.username, "vip");
        assert_eq!(rec.expires_at, issued.expires_at);
        assert!(rec.is_valid_at(now));
        assert!(!rec.is_valid_at(now + Duration::seconds(86_401)));

        assert!(store.lookup("never-issued").await.expect("lookup").is_none());

        cleanup(pool, path).await;
    }
}
