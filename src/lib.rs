//! Order Desk - order, product and user CRUD over HTTP
//!
//! # Modules
//!
//! - [`models`] - Order, product, user and audit records
//! - [`persistence`] - Repository traits, PostgreSQL and in-memory implementations
//! - [`db`] - PostgreSQL connection pool
//! - [`gateway`] - Router, handlers, services, response cache
//! - [`user_auth`] - Password hashing, JWT, auth and role gates
//! - [`events`] - Order status-change notifications
//! - [`config`] / [`logging`] - Startup configuration and tracing setup

pub mod config;
pub mod db;
pub mod events;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod persistence;
pub mod user_auth;

// Convenient re-exports at crate root
pub use gateway::build_router;
pub use gateway::services::{ServiceError, ServiceResult};
pub use gateway::state::{AppState, Repositories};
pub use models::{NewOrder, Order, OrderFilter, OrderUpdate, Product, ProductInput, User};
