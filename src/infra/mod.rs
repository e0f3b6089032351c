//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and migrations
//! - Repositories over the relational store
//! - The persistence gateway handed to services

pub mod db;
pub mod gateway;
pub mod repositories;

pub use db::{Database, HealthCheck, Migrator};
pub use gateway::{Persistence, PersistenceGateway};
pub use repositories::{AccountRepository, AccountStore, ProductRepository, ProductStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockAccountRepository, MockProductRepository};
