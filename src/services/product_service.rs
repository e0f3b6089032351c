//! Product service - Ownership-scoped product CRUD.
//!
//! Any authenticated caller may read a product by id. Only the owner may
//! update or delete it.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{AccountId, NewProduct, Product, ProductId, ProductPatch};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::PersistenceGateway;

/// Product service trait for dependency injection.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Create a product owned by `owner_id`
    async fn create(&self, owner_id: AccountId, product: NewProduct) -> AppResult<Product>;

    /// Get a product by ID
    async fn get(&self, id: ProductId) -> AppResult<Product>;

    /// List products owned by an account
    async fn list_by_owner(&self, owner_id: AccountId) -> AppResult<Vec<Product>>;

    /// Apply a partial update on behalf of `caller_id`
    async fn update(
        &self,
        id: ProductId,
        caller_id: AccountId,
        patch: ProductPatch,
    ) -> AppResult<Product>;

    /// Delete a product on behalf of `caller_id`
    async fn delete(&self, id: ProductId, caller_id: AccountId) -> AppResult<()>;
}

/// Concrete implementation of ProductService.
pub struct ProductManager<G: PersistenceGateway> {
    gateway: Arc<G>,
}

impl<G: PersistenceGateway> ProductManager<G> {
    /// Create new product service instance
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Fetch a product and check that `caller_id` owns it.
    async fn find_owned(&self, id: ProductId, caller_id: AccountId) -> AppResult<Product> {
        let product = self.get(id).await?;
        if !product.is_owned_by(caller_id) {
            tracing::warn!(
                product_id = id,
                owner_id = product.owner_id,
                caller_id,
                "Rejected access to product owned by another account"
            );
            return Err(AppError::Forbidden);
        }
        Ok(product)
    }
}

#[async_trait]
impl<G: PersistenceGateway> ProductService for ProductManager<G> {
    async fn create(&self, owner_id: AccountId, product: NewProduct) -> AppResult<Product> {
        // Re-run via the constructor so an empty description becomes None
        let product = NewProduct::new(product.name, product.description, product.price);
        product.validate()?;

        let created = self.gateway.products().insert(owner_id, product).await?;
        tracing::info!(product_id = created.id, owner_id, "Product created");
        Ok(created)
    }

    async fn get(&self, id: ProductId) -> AppResult<Product> {
        tracing::debug!(product_id = id, "Fetching product");
        self.gateway.products().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_by_owner(&self, owner_id: AccountId) -> AppResult<Vec<Product>> {
        let products = self.gateway.products().find_by_owner(owner_id).await?;
        tracing::debug!(owner_id, count = products.len(), "Listed products");
        Ok(products)
    }

    async fn update(
        &self,
        id: ProductId,
        caller_id: AccountId,
        patch: ProductPatch,
    ) -> AppResult<Product> {
        let mut product = self.find_owned(id, caller_id).await?;

        if !product.apply(patch)? {
            return Ok(product);
        }

        let updated = self.gateway.products().update(product).await?;
        tracing::info!(product_id = id, "Product updated");
        Ok(updated)
    }

    async fn delete(&self, id: ProductId, caller_id: AccountId) -> AppResult<()> {
        self.find_owned(id, caller_id).await?;
        self.gateway.products().delete(id).await?;
        tracing::info!(product_id = id, "Product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::predicate::eq;

    use super::*;
    use crate::infra::{
        AccountRepository, MockAccountRepository, MockProductRepository, ProductRepository,
    };

    struct MockGateway {
        products: Arc<MockProductRepository>,
    }

    impl PersistenceGateway for MockGateway {
        fn accounts(&self) -> Arc<dyn AccountRepository> {
            Arc::new(MockAccountRepository::new())
        }

        fn products(&self) -> Arc<dyn ProductRepository> {
            self.products.clone()
        }
    }

    fn manager(repo: MockProductRepository) -> ProductManager<MockGateway> {
        ProductManager::new(Arc::new(MockGateway {
            products: Arc::new(repo),
        }))
    }

    fn widget(owner_id: AccountId) -> Product {
        let now = Utc::now();
        Product {
            id: 10,
            name: "widget".to_string(),
            description: None,
            price: 9.99,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_with_non_positive_price_never_persists() {
        let mut repo = MockProductRepository::new();
        repo.expect_insert().never();
        let service = manager(repo);

        for price in [0.0, -1.0] {
            let result = service
                .create(1, NewProduct::new("widget", None, price))
                .await;
            assert!(matches!(result, Err(AppError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_create_drops_empty_description() {
        let mut repo = MockProductRepository::new();
        repo.expect_insert()
            .withf(|owner, p| *owner == 1 && p.description.is_none())
            .returning(|owner, _| Ok(widget(owner)));

        let product = manager(repo)
            .create(
                1,
                NewProduct {
                    name: "widget".into(),
                    description: Some(String::new()),
                    price: 9.99,
                },
            )
            .await
            .unwrap();

        assert_eq!(product.owner_id, 1);
    }

    #[tokio::test]
    async fn test_update_by_non_owner_is_forbidden_and_never_writes() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .with(eq(10))
            .returning(|_| Ok(Some(widget(1))));
        repo.expect_update().never();

        let result = manager(repo)
            .update(
                10,
                2,
                ProductPatch {
                    price: Some(19.99),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let result = manager(repo).update(10, 1, ProductPatch::default()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_price_only_keeps_name() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(widget(1))));
        repo.expect_update()
            .withf(|p| p.name == "widget" && p.price == 19.99)
            .returning(|p| Ok(p));

        let product = manager(repo)
            .update(
                10,
                1,
                ProductPatch {
                    price: Some(19.99),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(product.price, 19.99);
        assert_eq!(product.name, "widget");
    }

    #[tokio::test]
    async fn test_empty_patch_skips_write() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(widget(1))));
        repo.expect_update().never();

        let product = manager(repo)
            .update(10, 1, ProductPatch::default())
            .await
            .unwrap();

        assert_eq!(product.price, 9.99);
    }

    #[tokio::test]
    async fn test_delete_by_non_owner_is_forbidden() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(widget(1))));
        repo.expect_delete().never();

        let result = manager(repo).delete(10, 2).await;

        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn test_delete_by_owner() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(Some(widget(1))));
        repo.expect_delete().with(eq(10)).times(1).returning(|_| Ok(()));

        assert!(manager(repo).delete(10, 1).await.is_ok());
    }
}
