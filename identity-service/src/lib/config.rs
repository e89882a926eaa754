use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

const MIN_SECRET_LENGTH: usize = 32;
/// Ten years, in seconds.
const MAX_TOKEN_TTL: i64 = 10 * 365 * 24 * 60 * 60;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub refresh_tokens: RefreshTokenConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing settings. TTLs are in seconds.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub access_token_ttl: i64,
    pub refresh_token_ttl: i64,
}

/// Argon2id cost parameters used for new password hashes.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_cost_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RefreshTokenConfig {
    pub store: RefreshTokenStoreKind,
}

/// Backing store for the current refresh token identifier of each user.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RefreshTokenStoreKind {
    Postgres,
    Memory,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("database.max_connections", 5)?
            .set_default("server.http_port", 3000)?
            .set_default("jwt.issuer", "localhost")?
            .set_default("jwt.audience", "localhost")?
            .set_default("jwt.access_token_ttl", 3600)?
            .set_default("jwt.refresh_token_ttl", 86400)?
            .set_default("password.memory_cost_kib", argon2_defaults::MEMORY_COST_KIB)?
            .set_default("password.iterations", argon2_defaults::ITERATIONS)?
            .set_default("password.parallelism", argon2_defaults::PARALLELISM)?
            .set_default("refresh_tokens.store", "postgres")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::Message(format!(
                "jwt.secret must be at least {} bytes",
                MIN_SECRET_LENGTH
            )));
        }
        for (key, ttl) in [
            ("jwt.access_token_ttl", self.jwt.access_token_ttl),
            ("jwt.refresh_token_ttl", self.jwt.refresh_token_ttl),
        ] {
            if !(1..=MAX_TOKEN_TTL).contains(&ttl) {
                return Err(ConfigError::Message(format!(
                    "{} must be between 1 and {} seconds, got {}",
                    key, MAX_TOKEN_TTL, ttl
                )));
            }
        }
        Ok(())
    }
}

/// Matches `argon2::Params::DEFAULT_*`.
mod argon2_defaults {
    pub const MEMORY_COST_KIB: i64 = 19 * 1024;
    pub const ITERATIONS: i64 = 2;
    pub const PARALLELISM: i64 = 1;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret(secret: &str) -> Config {
        Config {
            database: DatabaseConfig {
                url: "postgresql://localhost/identity".to_string(),
                max_connections: 5,
            },
            server: ServerConfig { http_port: 3000 },
            jwt: JwtConfig {
                secret: secret.to_string(),
                issuer: "localhost".to_string(),
                audience: "localhost".to_string(),
                access_token_ttl: 3600,
                refresh_token_ttl: 86400,
            },
            password: PasswordConfig {
                memory_cost_kib: 1024,
                iterations: 1,
                parallelism: 1,
            },
            refresh_tokens: RefreshTokenConfig {
                store: RefreshTokenStoreKind::Memory,
            },
        }
    }

    #[test]
    fn test_validate_rejects_short_secret() {
        let config = config_with_secret("short");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_long_secret() {
        let config = config_with_secret("test-secret-key-for-jwt-signing-at-least-32-bytes");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_ttl() {
        let mut config = config_with_secret("test-secret-key-for-jwt-signing-at-least-32-bytes");
        config.jwt.refresh_token_ttl = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_ttl_beyond_ten_years() {
        let mut config = config_with_secret("test-secret-key-for-jwt-signing-at-least-32-bytes");
        config.jwt.refresh_token_ttl = 10_000_000_000_000;
        assert!(config.validate().is_err());

        let mut config = config_with_secret("test-secret-key-for-jwt-signing-at-least-32-bytes");
        config.jwt.access_token_ttl = i64::MAX;
        assert!(config.validate().is_err());

        let mut config = config_with_secret("test-secret-key-for-jwt-signing-at-least-32-bytes");
        config.jwt.refresh_token_ttl = MAX_TOKEN_TTL;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_store_kind_deserializes_lowercase() {
        let kind: RefreshTokenStoreKind = serde_json::from_str("\"memory\"").unwrap();
        assert_eq!(kind, RefreshTokenStoreKind::Memory);
    }
}
