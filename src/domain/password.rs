//! Credential hashing - one-way password transform and verification.
//!
//! `CredentialHasher` is the capability the account service depends on;
//! `Argon2Hasher` is its only implementation. `Password` wraps a stored hash
//! so it never leaks through `Debug`.

use argon2::{
    password_hash::{self, rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::config::HashingConfig;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// One-way credential hashing.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing PHC string.
    fn hash(&self, plain_text: &str) -> AppResult<String>;

    /// Check a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch. Fails only if the stored hash is
    /// malformed.
    fn verify(&self, plain_text: &str, hash: &str) -> AppResult<bool>;
}

/// Argon2id hasher with fixed cost parameters.
#[derive(Clone)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2Hasher").finish_non_exhaustive()
    }
}

impl Argon2Hasher {
    /// Build a hasher from cost parameters.
    ///
    /// # Errors
    /// Returns `Hashing` if the parameters are outside Argon2's bounds.
    pub fn new(config: HashingConfig) -> AppResult<Self> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AppError::hashing(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::hashing(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    fn verify(&self, plain_text: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::hashing(format!("Invalid hash format: {}", e)))?;

        // Cost parameters are read from the stored hash, not from `self`.
        match self.argon2.verify_password(plain_text.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::hashing(format!("Password verify failed: {}", e))),
        }
    }
}

/// Stored password hash value object.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Wrap an existing hash (from the database or a hasher).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage or verification.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}
