//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;

use chrono::Duration;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_HASH_ITERATIONS, DEFAULT_HASH_MEMORY_KIB,
    DEFAULT_HASH_PARALLELISM, DEFAULT_JWT_EXPIRATION_HOURS, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, MIN_JWT_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub token: TokenConfig,
    pub hashing: HashingConfig,
}

/// Token signing settings handed to the token service at construction.
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    pub expiration_hours: i64,
}

/// Argon2id cost parameters handed to the credential hasher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("token", &self.token)
            .field("hashing", &self.hashing)
            .finish()
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[REDACTED]")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// # Errors
    /// Fails if JWT_SECRET is missing in a release build or is too short.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                "dev-secret-key-minimum-32-chars!!".to_string()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_or("SERVER_PORT", DEFAULT_SERVER_PORT),
            token: TokenConfig::new(
                secret,
                parse_or("JWT_EXPIRATION_HOURS", DEFAULT_JWT_EXPIRATION_HOURS),
            )?,
            hashing: HashingConfig {
                memory_kib: parse_or("HASH_MEMORY_KIB", DEFAULT_HASH_MEMORY_KIB),
                iterations: parse_or("HASH_ITERATIONS", DEFAULT_HASH_ITERATIONS),
                parallelism: parse_or("HASH_PARALLELISM", DEFAULT_HASH_PARALLELISM),
            },
        })
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl TokenConfig {
    /// Build a token config, rejecting secrets shorter than the minimum
    /// and non-positive lifetimes.
    pub fn new(secret: impl Into<String>, expiration_hours: i64) -> AppResult<Self> {
        let secret = secret.into();
        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }
        if expiration_hours <= 0 {
            return Err(AppError::internal("JWT_EXPIRATION_HOURS must be positive"));
        }
        Ok(Self {
            secret,
            expiration_hours,
        })
    }

    /// Get JWT secret bytes for token signing/verification.
    pub fn secret_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    /// Token lifetime.
    pub fn validity(&self) -> Duration {
        Duration::hours(self.expiration_hours)
    }
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: DEFAULT_HASH_MEMORY_KIB,
            iterations: DEFAULT_HASH_ITERATIONS,
            parallelism: DEFAULT_HASH_PARALLELISM,
        }
    }
}

/// Read and parse an env var, falling back to `default` when unset or invalid.
fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
