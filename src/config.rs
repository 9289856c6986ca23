use crate::error::AuthError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Deserializer, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Environment variables recognized by [`Config::figment`].
pub const ENV_KEYS: [&str; 6] = [
    "AUTH_DB",
    "TOKEN_TTL_SECONDS",
    "DEFAULT_USER",
    "DEFAULT_PASS",
    "LISTEN_ADDR",
    "LOGLEVEL",
];

/// Runtime configuration, built once at startup and passed by reference.
///
/// Field names on the wire are the lowercased environment variable names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite database file (`AUTH_DB`).
    #[serde(rename = "auth_db")]
    pub database_path: PathBuf,
    /// Token lifetime in seconds (`TOKEN_TTL_SECONDS`).
    #[serde(rename = "token_ttl_seconds")]
    pub token_ttl: u64,
    /// Seed account created on first start (`DEFAULT_USER` / `DEFAULT_PASS`).
    #[serde(deserialize_with = "scalar_string")]
    pub default_user: String,
    #[serde(deserialize_with = "scalar_string")]
    pub default_pass: String,
    pub listen_addr: SocketAddr,
    #[serde(deserialize_with = "scalar_string")]
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("/data/auth.db"),
            token_ttl: 86_400,
            default_user: "vip".to_string(),
            default_pass: "1234".to_string(),
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    /// Defaults overlaid with the recognized environment variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::raw().only(&ENV_KEYS))
    }

    pub fn from_env() -> Result<Self, AuthError> {
        Ok(Self::figment().extract()?)
    }
}

/// Env values like `DEFAULT_PASS=1234` arrive as numbers; keep them as text.
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Str(String),
        Int(i64),
        UInt(u64),
        Float(f64),
        Bool(bool),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Str(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::UInt(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn empty_environment_yields_defaults() {
        Jail::expect_with(|_jail| {
            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg.database_path, PathBuf::from("/data/auth.db"));
            assert_eq!(cfg.token_ttl, 86_400);
            assert_eq!(cfg.default_user, "vip");
            assert_eq!(cfg.default_pass, "1234");
            assert_eq!(cfg.listen_addr.port(), 5000);
            assert_eq!(cfg.loglevel, "info");
            Ok(())
        });
    }

    #[test]
    fn overrides_are_applied() {
        Jail::expect_with(|jail| {
            jail.set_env("AUTH_DB", "/tmp/x.db");
            jail.set_env("TOKEN_TTL_SECONDS", "60");
            jail.set_env("DEFAULT_USER", "admin");
            jail.set_env("DEFAULT_PASS", "4321");
            jail.set_env("LISTEN_ADDR", "127.0.0.1:8080");
            jail.set_env("LOGLEVEL", "debug");

            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg.database_path, PathBuf::from("/tmp/x.db"));
            assert_eq!(cfg.token_ttl, 60);
            assert_eq!(cfg.default_user, "admin");
            assert_eq!(cfg.default_pass, "4321");
            assert_eq!(cfg.listen_addr.to_string(), "127.0.0.1:8080");
            assert_eq!(cfg.loglevel, "debug");
            Ok(())
        });
    }

    #[test]
    fn unrelated_variables_are_ignored() {
        Jail::expect_with(|jail| {
            jail.set_env("DATABASE_PATH", "/elsewhere.db");
            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg.database_path, PathBuf::from("/data/auth.db"));
            Ok(())
        });
    }

    #[test]
    fn bad_values_are_config_errors() {
        Jail::expect_with(|jail| {
            jail.set_env("TOKEN_TTL_SECONDS", "-5");
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, AuthError::Config(_)));

            jail.set_env("TOKEN_TTL_SECONDS", "60");
            jail.set_env("LISTEN_ADDR", "not-an-addr");
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, AuthError::Config(_)));
            Ok(())
        });
    }
}
