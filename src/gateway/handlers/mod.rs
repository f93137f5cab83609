//! HTTP handlers
//!
//! Thin adapters: extract, call a service, wrap the result in `ApiResponse`.

pub mod health;
pub mod order;
pub mod product;

pub use health::{HealthResponse, health_check};
pub use order::{create_order, delete_order, get_order, list_orders, update_order};
pub use product::{create_product, delete_product, get_product, list_products, update_product};
