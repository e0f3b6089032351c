//! Persistence gateway - single entry point to every repository.
//!
//! Services depend on `PersistenceGateway` rather than on concrete stores,
//! so tests can swap in mocks or in-memory repositories.
//!
//! Check-then-act sequences (email lookup before insert, ownership check
//! before update/delete) are not wrapped in a transaction. Unique and
//! foreign-key constraints in the schema are the backstop for races.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{AccountRepository, AccountStore, ProductRepository, ProductStore};

/// Repository access for the service layer.
pub trait PersistenceGateway: Send + Sync {
    /// Get account repository
    fn accounts(&self) -> Arc<dyn AccountRepository>;

    /// Get product repository
    fn products(&self) -> Arc<dyn ProductRepository>;
}

/// SeaORM-backed gateway sharing one connection pool across repositories.
pub struct Persistence {
    account_repo: Arc<AccountStore>,
    product_repo: Arc<ProductStore>,
}

impl Persistence {
    /// Create a gateway over an open connection pool
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            account_repo: Arc::new(AccountStore::new(db.clone())),
            product_repo: Arc::new(ProductStore::new(db)),
        }
    }
}

impl PersistenceGateway for Persistence {
    fn accounts(&self) -> Arc<dyn AccountRepository> {
        self.account_repo.clone()
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        self.product_repo.clone()
    }
}
