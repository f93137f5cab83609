//! Repository traits for data access abstraction
//!
//! Services hold these as `Arc<dyn Trait>` so the PostgreSQL implementations
//! can be swapped for the in-memory ones in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::RepositoryResult;
use crate::models::{
    AuditLog, NewAuditLog, NewOrder, NewUser, Order, OrderFilter, OrderUpdate, Product,
    ProductInput, User,
};

// ============================================================================
// Order Repository
// ============================================================================

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order and return the stored row
    async fn create(&self, order: &NewOrder) -> RepositoryResult<Order>;

    /// Get a live order; soft-deleted rows read as `None`
    async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<Order>>;

    /// Overwrite the mutable fields of a live order
    ///
    /// Returns `NotFound` when the order is missing or soft-deleted.
    async fn update(
        &self,
        id: i64,
        changes: &OrderUpdate,
        updated_at: DateTime<Utc>,
    ) -> RepositoryResult<Order>;

    /// Flag a live order as deleted; `NotFound` if it was not live
    async fn soft_delete(&self, id: i64) -> RepositoryResult<()>;

    /// Live orders passing `filter`, ordered by id
    async fn list(&self, filter: &OrderFilter) -> RepositoryResult<Vec<Order>>;
}

// ============================================================================
// Product Repository
// ============================================================================

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: &ProductInput) -> RepositoryResult<Product>;

    async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<Product>>;

    /// `NotFound` when no product has this id
    async fn update(&self, id: i64, product: &ProductInput) -> RepositoryResult<Product>;

    /// Hard delete; `NotFound` when no row was removed
    async fn delete(&self, id: i64) -> RepositoryResult<()>;

    async fn list(&self) -> RepositoryResult<Vec<Product>>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; a taken username yields `Duplicate`
    async fn create(&self, user: &NewUser) -> RepositoryResult<User>;

    async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<User>>;

    async fn get_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
}

// ============================================================================
// Audit Log Repository
// ============================================================================

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn create(&self, entry: &NewAuditLog) -> RepositoryResult<AuditLog>;
}
