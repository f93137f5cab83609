use std::sync::Arc;

use sqlx::PgPool;

use crate::db::Database;
use crate::events::StatusChangeNotifier;
use crate::gateway::cache::OrderCache;
use crate::gateway::services::{AuditService, OrderService, ProductService};
use crate::persistence::memory::{
    InMemoryAuditLogRepository, InMemoryUserRepository, in_memory_catalog,
};
use crate::persistence::{
    AuditLogRepository, OrderRepository, PgAuditLogRepository, PgOrderRepository,
    PgProductRepository, PgUserRepository, ProductRepository, UserRepository,
};
use crate::user_auth::{AuthService, JwtService, UserService};

/// One repository per entity
#[derive(Clone)]
pub struct Repositories {
    pub orders: Arc<dyn OrderRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub users: Arc<dyn UserRepository>,
    pub audit_logs: Arc<dyn AuditLogRepository>,
}

impl Repositories {
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            orders: Arc::new(PgOrderRepository::new(pool.clone())),
            products: Arc::new(PgProductRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool.clone())),
            audit_logs: Arc::new(PgAuditLogRepository::new(pool.clone())),
        }
    }

    /// Orders and products share one catalog so product references are checked
    pub fn in_memory() -> Self {
        let (orders, products) = in_memory_catalog();
        Self {
            orders: Arc::new(orders),
            products: Arc::new(products),
            users: Arc::new(InMemoryUserRepository::new()),
            audit_logs: Arc::new(InMemoryAuditLogRepository::new()),
        }
    }
}

/// Gateway application state (shared)
///
/// Built once in `main` (or a test) and handed to the router; nothing here is
/// global.
pub struct AppState {
    pub orders: Arc<OrderService>,
    pub products: Arc<ProductService>,
    pub auth: Arc<AuthService>,
    pub audit: Arc<AuditService>,
    /// Shared by login (signing) and the auth gate (verification)
    pub jwt: Arc<JwtService>,
    /// PostgreSQL pool; `None` when running on in-memory repositories
    pub db: Option<Arc<Database>>,
}

impl AppState {
    pub fn new(
        repos: Repositories,
        cache: Arc<dyn OrderCache>,
        notifier: Arc<dyn StatusChangeNotifier>,
        jwt: Arc<JwtService>,
        db: Option<Arc<Database>>,
    ) -> Self {
        let users = Arc::new(UserService::new(repos.users));
        Self {
            orders: Arc::new(OrderService::new(repos.orders, cache, notifier)),
            products: Arc::new(ProductService::new(repos.products)),
            auth: Arc::new(AuthService::new(users, jwt.clone())),
            audit: Arc::new(AuditService::new(repos.audit_logs)),
            jwt,
            db,
        }
    }
}
