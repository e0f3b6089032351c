//! Product repository implementation (hard delete, no tombstones).

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};

use super::entities::product::{self, ActiveModel, Entity as ProductEntity};
use crate::domain::{AccountId, NewProduct, Product, ProductId};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product owned by `owner_id`
    async fn insert(&self, owner_id: AccountId, product: NewProduct) -> AppResult<Product>;

    /// Find product by ID
    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>>;

    /// List every product owned by an account (unordered)
    async fn find_by_owner(&self, owner_id: AccountId) -> AppResult<Vec<Product>>;

    /// Persist name, description, price and updated_at. Owner is never written.
    async fn update(&self, product: Product) -> AppResult<Product>;

    /// Permanently remove a product
    async fn delete(&self, id: ProductId) -> AppResult<()>;
}

/// Concrete implementation of ProductRepository
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn insert(&self, owner_id: AccountId, product: NewProduct) -> AppResult<Product> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            name: Set(product.name),
            description: Set(product.description),
            price: Set(product.price),
            owner_id: Set(owner_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..<ActiveModel as ActiveModelTrait>::default()
        };

        let model = active_model.insert(&self.db).await.map_err(|e| {
            // The owner came from a token whose account no longer exists
            if let Some(SqlErr::ForeignKeyConstraintViolation(_)) = e.sql_err() {
                AppError::Unauthorized
            } else {
                AppError::from(e)
            }
        })?;
        Ok(Product::from(model))
    }

    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        let result = ProductEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Product::from))
    }

    async fn find_by_owner(&self, owner_id: AccountId) -> AppResult<Vec<Product>> {
        let models = ProductEntity::find()
            .filter(product::Column::OwnerId.eq(owner_id))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Product::from).collect())
    }

    async fn update(&self, product: Product) -> AppResult<Product> {
        let active_model = ActiveModel {
            id: Set(product.id),
            name: Set(product.name),
            description: Set(product.description),
            price: Set(product.price),
            updated_at: Set(product.updated_at),
            ..<ActiveModel as ActiveModelTrait>::default()
        };

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            // Row vanished between the ownership check and the write
            DbErr::RecordNotUpdated => AppError::NotFound,
            other => AppError::from(other),
        })?;
        Ok(Product::from(model))
    }

    async fn delete(&self, id: ProductId) -> AppResult<()> {
        let result = ProductEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
