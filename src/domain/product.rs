//! Product domain entity and related types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::account::AccountId;
use crate::errors::{AppError, AppResult};

/// Server-assigned product identifier.
pub type ProductId = i64;

/// Product owned by exactly one account.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub owner_id: AccountId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Check whether `account_id` owns this product.
    pub fn is_owned_by(&self, account_id: AccountId) -> bool {
        self.owner_id == account_id
    }

    /// Apply a partial update. Absent or empty fields are left unchanged.
    ///
    /// Returns whether anything changed.
    pub fn apply(&mut self, patch: ProductPatch) -> AppResult<bool> {
        patch.validate()?;

        let mut changed = false;
        if let Some(name) = patch.name.filter(|n| !n.is_empty()) {
            self.name = name;
            changed = true;
        }
        if let Some(description) = patch.description.filter(|d| !d.is_empty()) {
            self.description = Some(description);
            changed = true;
        }
        if let Some(price) = patch.price.filter(|p| *p != 0.0) {
            self.price = price;
            changed = true;
        }
        if changed {
            self.updated_at = Utc::now();
        }
        Ok(changed)
    }
}

/// Data required to create a product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, description: Option<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            // An empty description is stored as absent
            description: description.filter(|d| !d.is_empty()),
            price,
        }
    }

    /// Enforce product invariants before anything reaches the store.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Product name is required"));
        }
        ensure_positive_price(self.price)
    }
}

/// Partial product update. `None`, `""` and a price of `0.0` all mean
/// "leave unchanged", never "clear".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

impl ProductPatch {
    /// Only a supplied, non-zero price is checked.
    pub fn validate(&self) -> AppResult<()> {
        match self.price {
            Some(price) if price != 0.0 => ensure_positive_price(price),
            _ => Ok(()),
        }
    }

    /// True if applying this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.as_deref().map_or(true, str::is_empty)
            && self.description.as_deref().map_or(true, str::is_empty)
            && self.price.map_or(true, |p| p == 0.0)
    }
}

fn ensure_positive_price(price: f64) -> AppResult<()> {
    // NaN fails the comparison as well
    if price.is_finite() && price > 0.0 {
        Ok(())
    } else {
        Err(AppError::validation("Price must be greater than 0"))
    }
}

/// Product response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductResponse {
    #[schema(example = 1)]
    pub id: ProductId,
    #[schema(example = "widget")]
    pub name: String,
    #[schema(example = "A very useful widget")]
    pub description: Option<String>,
    #[schema(example = 9.99)]
    pub price: f64,
    #[schema(example = 1)]
    pub owner_id: AccountId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            owner_id: product.owner_id,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}
