//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::errors::AppResult;
use crate::infra::{Database, HealthCheck};
use crate::services::{AccountService, ProductService, ServiceContainer, Services, TokenService};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Account service
    pub account_service: Arc<dyn AccountService>,
    /// Product service
    pub product_service: Arc<dyn ProductService>,
    /// Token service, used by the authentication gate
    pub token_service: Arc<dyn TokenService>,
    /// Store connectivity probe
    pub health: Arc<dyn HealthCheck>,
}

impl AppState {
    /// Create application state from a database and config.
    pub fn from_config(database: Arc<Database>, config: &Config) -> AppResult<Self> {
        let services = Services::from_connection(database.get_connection(), config)?;
        Ok(Self::new(&services, database))
    }

    /// Create application state from any service container.
    pub fn new(services: &impl ServiceContainer, health: Arc<dyn HealthCheck>) -> Self {
        Self {
            account_service: services.accounts(),
            product_service: services.products(),
            token_service: services.tokens(),
            health,
        }
    }
}
