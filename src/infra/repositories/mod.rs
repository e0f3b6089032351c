//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod account_repository;
pub(crate) mod entities;
mod product_repository;

pub use account_repository::{AccountRepository, AccountStore};
pub use product_repository::{ProductRepository, ProductStore};

// Export mocks for tests
#[cfg(any(test, feature = "test-utils"))]
pub use account_repository::MockAccountRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use product_repository::MockProductRepository;
