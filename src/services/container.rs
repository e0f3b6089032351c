//! Service container - Centralized access to application services.

use std::sync::Arc;

use super::{
    AccountManager, AccountService, JwtTokens, ProductManager, ProductService, TokenService,
};
use crate::config::Config;
use crate::domain::{Argon2Hasher, CredentialHasher};
use crate::errors::AppResult;
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get account service
    fn accounts(&self) -> Arc<dyn AccountService>;

    /// Get product service
    fn products(&self) -> Arc<dyn ProductService>;

    /// Get token service
    fn tokens(&self) -> Arc<dyn TokenService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    account_service: Arc<dyn AccountService>,
    product_service: Arc<dyn ProductService>,
    token_service: Arc<dyn TokenService>,
}

impl Services {
    /// Create a service container from already-built services
    pub fn new(
        account_service: Arc<dyn AccountService>,
        product_service: Arc<dyn ProductService>,
        token_service: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            account_service,
            product_service,
            token_service,
        }
    }

    /// Wire every service over a database connection.
    ///
    /// # Errors
    /// Returns `Hashing` if the configured Argon2 parameters are invalid.
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> AppResult<Self> {
        let gateway = Arc::new(Persistence::new(db));
        let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2Hasher::new(config.hashing)?);
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokens::new(&config.token));

        Ok(Self {
            account_service: Arc::new(AccountManager::new(
                gateway.clone(),
                hasher,
                tokens.clone(),
            )),
            product_service: Arc::new(ProductManager::new(gateway)),
            token_service: tokens,
        })
    }
}

impl ServiceContainer for Services {
    fn accounts(&self) -> Arc<dyn AccountService> {
        self.account_service.clone()
    }

    fn products(&self) -> Arc<dyn ProductService> {
        self.product_service.clone()
    }

    fn tokens(&self) -> Arc<dyn TokenService> {
        self.token_service.clone()
    }
}
