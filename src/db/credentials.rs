use crate::db::models::DbCredential;
use crate::db::sqlite::SqlitePool;
use crate::error::AuthError;
use crate::service::password::verify_password_blocking;

/// Username → password hash storage.
///
/// Each query checks a connection out of the pool for its own round trip only.
#[derive(Clone)]
pub struct CredentialStore {
    pool: SqlitePool,
}

impl CredentialStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, username: &str) -> Result<Option<DbCredential>, AuthError> {
        let row = sqlx::query_as::<_, DbCredential>(
            "SELECT username, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn exists(&self, username: &str) -> Result<bool, AuthError> {
        Ok(self.get(username).await?.is_some())
    }

    /// Check `password` against the stored hash.
    ///
    /// An unknown username and a wrong password both yield `Ok(false)`. The
    /// connection is back in the pool before hashing starts.
    pub async fn verify(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        let Some(cred) = self.get(username).await? else {
            return Ok(false);
        };
        verify_password_blocking(password.to_owned(), cred.password_hash).await
    }

    /// Insert unless the username is taken. Returns whether a row was written.
    pub async fn insert_if_absent(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<bool, AuthError> {
        let result = sqlx::query(
            "INSERT INTO users (username, password_hash) VALUES (?, ?)
             ON CONFLICT(username) DO NOTHING",
        )
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{cleanup, temp_pool, temp_pool_sized};
    use crate::service::password::hash_password;

    #[tokio::test]
    async fn verify_distinguishes_nothing_but_success() {
        let (pool, path) = temp_pool("cred-verify").await;
        let store = CredentialStore::new(pool.clone());

        let hash = hash_password("1234").expect("hash");
        assert!(store.insert_if_absent("vip", &hash).await.expect("insert"));

        assert!(store.verify("vip", "1234").await.expect("verify"));
        assert!(!store.verify("vip", "wrong").await.expect("verify"));
        assert!(!store.verify("nobody", "1234").await.expect("verify"));

        cleanup(pool, path).await;
    }

    #[tokio::test]
    async fn insert_if_absent_never_overwrites() {
        let (pool, path) = temp_pool("cred-insert").await;
        let store = CredentialStore::new(pool.clone());

        let first = hash_password("first").expect("hash");
        let second = hash_password("second").expect("hash");
        assert!(store.insert_if_absent("vip", &first).await.expect("insert"));
        assert!(!store.insert_if_absent("vip", &second).await.expect("insert"));

        let stored = store.get("vip").await.expect("get").expect("row");
        assert_eq!(stored.password_hash, first);
        assert!(store.exists("vip").await.expect("exists"));
        assert!(!store.exists("other").await.expect("exists"));

        cleanup(pool, path).await;
    }

    #[tokio::test]
    async fn corrupt_stored_hash_surfaces_as_error() {
        let (pool, path) = temp_pool("cred-corrupt").await;
        let store = CredentialStore::new(pool.clone());

        store
            .insert_if_absent("vip", "plaintext-oops")
            .await
            .expect("insert");
        let err = store.verify("vip", "1234").await.unwrap_err();
        assert!(matches!(err, AuthError::PasswordHash(_)));

        cleanup(pool, path).await;
    }

    #[tokio::test]
    async fn no_connection_is_held_while_hashing() {
        let (pool, path) = temp_pool_sized("cred-hold", 1).await;
        let store = CredentialStore::new(pool.clone());
        let hash = hash_password("1234").expect("hash");
        store.insert_if_absent("vip", &hash).await.expect("insert");

        let verifying = tokio::spawn({
            let store = store.clone();
            async move { store.verify("vip", "1234").await }
        });

        // While the hash runs, the single connection must still be obtainable.
        let conn = tokio::time::timeout(std::time::Duration::from_secs(5), pool.acquire())
            .await
            .expect("acquire timed out")
            .expect("acquire");
        drop(conn);

        assert!(verifying.await.expect("join").expect("verify"));
        cleanup(pool, path).await;
    }
}
