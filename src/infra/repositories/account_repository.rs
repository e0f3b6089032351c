//! Account repository implementation.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::entities::account::{self, ActiveModel, Entity as AccountEntity};
use crate::domain::{Account, AccountId, NewAccount};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account. Unique violations surface as `Conflict`.
    async fn insert(&self, account: NewAccount) -> AppResult<Account>;

    /// Find account by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Find account by ID
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>>;
}

/// Concrete implementation of AccountRepository
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn insert(&self, account: NewAccount) -> AppResult<Account> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            username: Set(account.username),
            email: Set(account.email),
            password_hash: Set(account.password.into_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..<ActiveModel as ActiveModelTrait>::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::from_insert(e, "Account"))?;
        Ok(Account::from(model))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let result = AccountEntity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Account::from))
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        let result = AccountEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Account::from))
    }
}
