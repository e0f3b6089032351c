//! Account domain entity and related types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::password::Password;

/// Server-assigned account identifier.
pub type AccountId = i64;

/// Registered account. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub password: Password,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert an account. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: Password,
}

/// Account response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountResponse {
    /// Unique account identifier
    #[schema(example = 1)]
    pub id: AccountId,
    /// Unique username
    #[schema(example = "jdoe")]
    pub username: String,
    /// Unique email address
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            created_at: account.created_at,
        }
    }
}
