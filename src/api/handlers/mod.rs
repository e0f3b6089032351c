//! HTTP request handlers.

pub mod auth_handler;
pub mod product_handler;

pub use auth_handler::{account_routes, auth_routes};
pub use product_handler::product_routes;
