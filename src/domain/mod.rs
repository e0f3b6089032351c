//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod account;
pub mod password;
pub mod product;

pub use account::{Account, AccountId, AccountResponse, NewAccount};
pub use password::{Argon2Hasher, CredentialHasher, Password};
pub use product::{NewProduct, Product, ProductId, ProductPatch, ProductResponse};

#[cfg(any(test, feature = "test-utils"))]
pub use password::MockCredentialHasher;
