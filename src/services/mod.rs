//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) and reach
//! the store only through the persistence gateway.

mod account_service;
pub mod container;
mod product_service;
pub mod token_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use account_service::{AccountManager, AccountService};
pub use product_service::{ProductManager, ProductService};
pub use token_service::{Claims, Clock, IssuedToken, JwtTokens, SystemClock, TokenService};
