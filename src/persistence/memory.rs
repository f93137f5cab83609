//! In-process repositories
//!
//! Same contracts as the PostgreSQL implementations, backed by a `Mutex`.
//! Used by the test suites and by `main` when `postgres_url` is not set.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{
    AuditLogRepository, OrderRepository, ProductRepository, RepositoryError, RepositoryResult,
    UserRepository,
};
use crate::models::{
    AuditLog, NewAuditLog, NewOrder, NewUser, Order, OrderFilter, OrderUpdate, Product,
    ProductInput, User,
};

/// Rows keyed by id plus the last id handed out
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

fn lock<T>(table: &Mutex<Table<T>>) -> MutexGuard<'_, Table<T>> {
    table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ============================================================================
// Catalog (orders + products)
// ============================================================================

/// Order and product rows behind one handle, so order writes see the
/// product table the way the `orders.product_id` foreign key does.
///
/// Lock order is always products, then orders.
#[derive(Default)]
struct Catalog {
    products: Mutex<Table<Product>>,
    orders: Mutex<Table<Order>>,
}

/// Order and product repositories over the same in-process catalog
pub fn in_memory_catalog() -> (InMemoryOrderRepository, InMemoryProductRepository) {
    let catalog = Arc::new(Catalog::default());
    (
        InMemoryOrderRepository {
            catalog: catalog.clone(),
        },
        InMemoryProductRepository { catalog },
    )
}

// ============================================================================
// Orders
// ============================================================================

/// Orders over a catalog; built alone it has no products, so every
/// create is rejected until one is added through [`Self::products`].
#[derive(Default)]
pub struct InMemoryOrderRepository {
    catalog: Arc<Catalog>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Product repository sharing this repository's catalog
    pub fn products(&self) -> InMemoryProductRepository {
        InMemoryProductRepository {
            catalog: self.catalog.clone(),
        }
    }

    /// Raw row including soft-deleted ones
    pub fn raw(&self, id: i64) -> Option<Order> {
        lock(&self.catalog.orders).rows.get(&id).cloned()
    }

    /// Number of rows ever stored, deleted or not
    pub fn len(&self) -> usize {
        lock(&self.catalog.orders).rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: &NewOrder) -> RepositoryResult<Order> {
        let products = lock(&self.catalog.products);
        if !products.rows.contains_key(&order.product_id) {
            return Err(RepositoryError::InvalidReference(format!(
                "product {} does not exist",
                order.product_id
            )));
        }

        let mut table = lock(&self.catalog.orders);
        let now = Utc::now();
        let row = Order {
            id: table.next_id(),
            customer_name: order.customer_name.clone(),
            status: order.effective_status().to_string(),
            total_price: order.total_price,
            product_id: order.product_id,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<Order>> {
        Ok(lock(&self.catalog.orders)
            .rows
            .get(&id)
            .filter(|o| !o.is_deleted)
            .cloned())
    }

    async fn update(
        &self,
        id: i64,
        changes: &OrderUpdate,
        updated_at: DateTime<Utc>,
    ) -> RepositoryResult<Order> {
        let mut table = lock(&self.catalog.orders);
        let row = table
            .rows
            .get_mut(&id)
            .filter(|o| !o.is_deleted)
            .ok_or(RepositoryError::NotFound)?;
        row.customer_name = changes.customer_name.clone();
        row.status = changes.status.clone();
        row.total_price = changes.total_price;
        row.updated_at = updated_at;
        Ok(row.clone())
    }

    async fn soft_delete(&self, id: i64) -> RepositoryResult<()> {
        let mut table = lock(&self.catalog.orders);
        let row = table
            .rows
            .get_mut(&id)
            .filter(|o| !o.is_deleted)
            .ok_or(RepositoryError::NotFound)?;
        row.is_deleted = true;
        row.updated_at = Utc::now();
        Ok(())
    }

    async fn list(&self, filter: &OrderFilter) -> RepositoryResult<Vec<Order>> {
        Ok(lock(&self.catalog.orders)
            .rows
            .values()
            .filter(|o| !o.is_deleted && filter.matches(o))
            .cloned()
            .collect())
    }
}

// ============================================================================
// Products
// ============================================================================

#[derive(Default)]
pub struct InMemoryProductRepository {
    catalog: Arc<Catalog>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: &ProductInput) -> RepositoryResult<Product> {
        let mut table = lock(&self.catalog.products);
        let row = Product {
            id: table.next_id(),
            name: product.name.clone(),
            price: product.price,
            quantity: product.quantity,
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<Product>> {
        Ok(lock(&self.catalog.products).rows.get(&id).cloned())
    }

    async fn update(&self, id: i64, product: &ProductInput) -> RepositoryResult<Product> {
        let mut table = lock(&self.catalog.products);
        let row = table.rows.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        row.name = product.name.clone();
        row.price = product.price;
        row.quantity = product.quantity;
        Ok(row.clone())
    }

    /// Soft-deleted orders still hold the reference, as in PostgreSQL
    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let mut products = lock(&self.catalog.products);
        if !products.rows.contains_key(&id) {
            return Err(RepositoryError::NotFound);
        }
        if lock(&self.catalog.orders)
            .rows
            .values()
            .any(|o| o.product_id == id)
        {
            return Err(RepositoryError::InvalidReference(format!(
                "product {} is referenced by orders",
                id
            )));
        }
        products.rows.remove(&id);
        Ok(())
    }

    async fn list(&self) -> RepositoryResult<Vec<Product>> {
        Ok(lock(&self.catalog.products).rows.values().cloned().collect())
    }
}

// ============================================================================
// Users
// ============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    table: Mutex<Table<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> RepositoryResult<User> {
        let mut table = lock(&self.table);
        if table.rows.values().any(|u| u.username == user.username) {
            return Err(RepositoryError::Duplicate(format!(
                "username {} already exists",
                user.username
            )));
        }
        let now = Utc::now();
        let row = User {
            id: table.next_id(),
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role.clone(),
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        Ok(lock(&self.table).rows.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> RepositoryResult<Option<User>> {
        Ok(lock(&self.table)
            .rows
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

// ============================================================================
// Audit logs
// ============================================================================

#[derive(Default)]
pub struct InMemoryAuditLogRepository {
    table: Mutex<Table<AuditLog>>,
}

impl InMemoryAuditLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<AuditLog> {
        lock(&self.table).rows.values().cloned().collect()
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLogRepository {
    async fn create(&self, entry: &NewAuditLog) -> RepositoryResult<AuditLog> {
        let mut table = lock(&self.table);
        let row = AuditLog {
            id: table.next_id(),
            action: entry.action.clone(),
            details: entry.details.clone(),
            user_id: entry.user_id,
            created_at: Utc::now(),
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }
}
