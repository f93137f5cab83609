//! Domain records shared by persistence, services and handlers

pub mod audit;
pub mod order;
pub mod product;
pub mod user;

pub use audit::{AuditLog, NewAuditLog};
pub use order::{DEFAULT_ORDER_STATUS, NewOrder, Order, OrderFilter, OrderUpdate};
pub use product::{Product, ProductInput};
pub use user::{NewUser, User, roles};
