//! Account service - Registration, login and profile lookup.

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use std::sync::Arc;

use super::token_service::{IssuedToken, TokenService};
use crate::domain::{Account, AccountId, CredentialHasher, NewAccount, Password};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::PersistenceGateway;

/// Plaintext hashed once per manager to build the dummy hash used when a
/// login names an unknown email.
const DUMMY_PASSWORD: &str = "dummy-password-for-missing-accounts";

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new account
    async fn register(&self, username: String, email: String, password: String)
        -> AppResult<Account>;

    /// Login and return a token whose subject is the account id
    async fn login(&self, email: String, password: String) -> AppResult<IssuedToken>;

    /// Get an account by ID
    async fn get_profile(&self, id: AccountId) -> AppResult<Account>;
}

/// Concrete implementation of AccountService.
pub struct AccountManager<G: PersistenceGateway> {
    gateway: Arc<G>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenService>,
    dummy_hash: OnceCell<String>,
}

impl<G: PersistenceGateway> AccountManager<G> {
    /// Create new account service instance
    pub fn new(
        gateway: Arc<G>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            gateway,
            hasher,
            tokens,
            dummy_hash: OnceCell::new(),
        }
    }

    fn dummy_hash(&self) -> AppResult<&str> {
        self.dummy_hash
            .get_or_try_init(|| self.hasher.hash(DUMMY_PASSWORD))
            .map(String::as_str)
    }
}

#[async_trait]
impl<G: PersistenceGateway> AccountService for AccountManager<G> {
    async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> AppResult<Account> {
        if self.gateway.accounts().find_by_email(&email).await?.is_some() {
            tracing::info!(%email, "Registration rejected: email already in use");
            return Err(AppError::conflict("Account"));
        }

        let hash = self.hasher.hash(&password)?;
        // Concurrent registrations that pass the check above are caught by
        // the unique indexes and come back as Conflict.
        let account = self
            .gateway
            .accounts()
            .insert(NewAccount {
                username,
                email,
                password: Password::from_hash(hash),
            })
            .await?;

        tracing::info!(account_id = account.id, "Account registered");
        Ok(account)
    }

    async fn login(&self, email: String, password: String) -> AppResult<IssuedToken> {
        let account = self.gateway.accounts().find_by_email(&email).await?;

        // Missing accounts still pay for a verification so both failure
        // paths take the same time.
        let Some(account) = account else {
            let _ = self.hasher.verify(&password, self.dummy_hash()?)?;
            tracing::warn!("Login failed: unknown email");
            return Err(AppError::InvalidCredentials);
        };

        if !self.hasher.verify(&password, account.password.as_str())? {
            tracing::warn!(account_id = account.id, "Login failed: wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(&account.id.to_string())?;
        tracing::info!(account_id = account.id, "Login succeeded");
        Ok(token)
    }

    async fn get_profile(&self, id: AccountId) -> AppResult<Account> {
        tracing::debug!(account_id = id, "Fetching profile");
        self.gateway.accounts().find_by_id(id).await?.ok_or_not_found()
    }
}
