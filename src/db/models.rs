use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbCredential {
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbToken {
    pub token: String,
    pub username: String,
    pub expires_at: i64,
}

/// A stored token as seen by callers of the token store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRecord {
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

impl TokenRecord {
    /// Expiry is stored in whole seconds; a token stays usable through its
    /// expiry second and is rejected once `now` is past it.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() <= self.expires_at.timestamp()
    }
}

impl From<DbToken> for TokenRecord {
    fn from(d: DbToken) -> Self {
        Self {
            username: d.username,
            // Out-of-range values can only come from a hand-edited row; treat as expired.
            expires_at: DateTime::from_timestamp(d.expires_at, 0).unwrap_or_default(),
        }
    }
}
