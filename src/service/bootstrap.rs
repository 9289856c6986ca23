use crate::config::Config;
use crate::db::{self, CredentialStore, SqlitePool};
use crate::error::AuthError;
use crate::service::password::hash_password_blocking;
use tracing::info;

/// Open storage, ensure the schema, and seed the default account.
pub async fn bootstrap(cfg: &Config) -> Result<SqlitePool, AuthError> {
    let pool = db::spawn(&cfg.database_path).await?;
    seed_default_account(&pool, cfg).await?;
    Ok(pool)
}

/// Create the configured default account if it does not exist yet.
/// An existing account is left untouched, whatever its password.
pub async fn seed_default_account(pool: &SqlitePool, cfg: &Config) -> Result<(), AuthError> {
    let store = CredentialStore::new(pool.clone());

    if store.exists(&cfg.default_user).await? {
        info!(username = %cfg.default_user, "default account present; skipping seed");
        return Ok(());
    }

    let hash = hash_password_blocking(cfg.default_pass.clone()).await?;
    if store.insert_if_absent(&cfg.default_user, &hash).await? {
        info!(username = %cfg.default_user, "default account seeded");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{cleanup, temp_db_path};

    #[tokio::test]
    async fn bootstrap_is_idempotent_and_keeps_original_password() {
        let path = temp_db_path("bootstrap");
        let mut cfg = Config {
            database_path: path.clone(),
            ..Config::default()
        };

        let pool = bootstrap(&cfg).await.expect("first bootstrap");
        pool.close().await;

        cfg.default_pass = "changed".to_string();
        let pool = bootstrap(&cfg).await.expect("second bootstrap");

        let store = CredentialStore::new(pool.clone());
        assert!(store.verify("vip", "1234").await.expect("verify"));
        assert!(!store.verify("vip", "changed").await.expect("verify"));

        cleanup(pool, path).await;
    }

    #[tokio::test]
    async fn bootstrap_creates_missing_parent_directory() {
        let dir = temp_db_path("bootstrap-dir");
        let path = dir.join("nested").join("auth.db");
        let cfg = Config {
            database_path: path.clone(),
            ..Config::default()
        };

        let pool = bootstrap(&cfg).await.expect("bootstrap");
        assert!(path.exists());

        pool.close().await;
        let _ = std::fs::remove_dir_all(&dir);
    }
}
