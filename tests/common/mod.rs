//! Shared test fixtures: an in-memory persistence gateway and cheap
//! service wiring.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use product_api::config::{HashingConfig, TokenConfig};
use product_api::domain::{
    Account, AccountId, Argon2Hasher, CredentialHasher, NewAccount, NewProduct, Product,
    ProductId,
};
use product_api::errors::{AppError, AppResult};
use product_api::infra::{AccountRepository, PersistenceGateway, ProductRepository};
use product_api::services::{AccountManager, JwtTokens, ProductManager, TokenService};

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

#[derive(Default)]
struct Tables {
    accounts: Mutex<Vec<Account>>,
    products: Mutex<HashMap<ProductId, Product>>,
    next_id: AtomicI64,
}

impl Tables {
    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// Gateway over plain collections, enforcing the same unique and
/// foreign-key rules as the relational schema.
#[derive(Default, Clone)]
pub struct InMemoryGateway {
    tables: Arc<Tables>,
}

impl InMemoryGateway {
    pub fn account_count(&self) -> usize {
        self.tables.accounts.lock().unwrap().len()
    }

    pub fn product_count(&self) -> usize {
        self.tables.products.lock().unwrap().len()
    }
}

impl PersistenceGateway for InMemoryGateway {
    fn accounts(&self) -> Arc<dyn AccountRepository> {
        Arc::new(self.clone())
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl AccountRepository for InMemoryGateway {
    async fn insert(&self, account: NewAccount) -> AppResult<Account> {
        let mut accounts = self.tables.accounts.lock().unwrap();
        if accounts
            .iter()
            .any(|a| a.email == account.email || a.username == account.username)
        {
            return Err(AppError::conflict("Account"));
        }

        let now = Utc::now();
        let stored = Account {
            id: self.tables.next_id(),
            username: account.username,
            email: account.email,
            password: account.password,
            created_at: now,
            updated_at: now,
        };
        accounts.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let accounts = self.tables.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        let accounts = self.tables.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.id == id).cloned())
    }
}

#[async_trait]
impl ProductRepository for InMemoryGateway {
    async fn insert(&self, owner_id: AccountId, product: NewProduct) -> AppResult<Product> {
        let owner_exists = self
            .tables
            .accounts
            .lock()
            .unwrap()
            .iter()
            .any(|a| a.id == owner_id);
        if !owner_exists {
            return Err(AppError::Unauthorized);
        }

        let now = Utc::now();
        let stored = Product {
            id: self.tables.next_id(),
            name: product.name,
            description: product.description,
            price: product.price,
            owner_id,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .products
            .lock()
            .unwrap()
            .insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        Ok(self.tables.products.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: AccountId) -> AppResult<Vec<Product>> {
        let products = self.tables.products.lock().unwrap();
        Ok(products
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update(&self, product: Product) -> AppResult<Product> {
        let mut products = self.tables.products.lock().unwrap();
        let stored = products.get_mut(&product.id).ok_or(AppError::NotFound)?;
        stored.name = product.name;
        stored.description = product.description;
        stored.price = product.price;
        stored.updated_at = product.updated_at;
        Ok(stored.clone())
    }

    async fn delete(&self, id: ProductId) -> AppResult<()> {
        self.tables
            .products
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::NotFound)
    }
}

/// Lowest legal Argon2 cost keeps the suite fast.
pub fn cheap_hasher() -> Arc<dyn CredentialHasher> {
    Arc::new(
        Argon2Hasher::new(HashingConfig {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap(),
    )
}

pub fn test_tokens() -> Arc<dyn TokenService> {
    Arc::new(JwtTokens::new(&TokenConfig::new(TEST_SECRET, 1).unwrap()))
}

/// Real services over an in-memory store.
pub struct TestServices {
    pub gateway: Arc<InMemoryGateway>,
    pub tokens: Arc<dyn TokenService>,
    pub accounts: Arc<AccountManager<InMemoryGateway>>,
    pub products: Arc<ProductManager<InMemoryGateway>>,
}

pub fn test_services() -> TestServices {
    let gateway = Arc::new(InMemoryGateway::default());
    let tokens = test_tokens();
    TestServices {
        accounts: Arc::new(AccountManager::new(
            gateway.clone(),
            cheap_hasher(),
            tokens.clone(),
        )),
        products: Arc::new(ProductManager::new(gateway.clone())),
        gateway,
        tokens,
    }
}
