//! TTL cache for order reads
//!
//! Uses the `cached` crate's `TimedCache`. Entries become invisible once their
//! TTL has elapsed; a background janitor purges them periodically so memory
//! does not grow with dead keys. List results are never invalidated by writes.

use cached::{Cached, TimedCache};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::models::{Order, OrderFilter};

/// Default entry lifetime in seconds
pub const TTL_SECONDS: u64 = 300;

/// Default interval between expired-entry sweeps in seconds
pub const CLEANUP_INTERVAL_SECONDS: u64 = 600;

/// Response cache used by the order service
///
/// Implementations must be infallible: a cache problem is a miss.
pub trait OrderCache: Send + Sync {
    fn get_order(&self, id: i64) -> Option<Order>;

    fn set_order(&self, order: &Order);

    fn delete_order(&self, id: i64);

    fn get_orders(&self, filter: &OrderFilter) -> Option<Vec<Order>>;

    fn set_orders(&self, filter: &OrderFilter, orders: &[Order]);
}

/// `OrderCache` over two `TimedCache`s: one per order id, one per filter key
pub struct TtlOrderCache {
    orders: Mutex<TimedCache<i64, Order>>,
    lists: Mutex<TimedCache<String, Vec<Order>>>,
}

impl TtlOrderCache {
    pub fn new(ttl: Duration) -> Self {
        let secs = ttl.as_secs().max(1);
        Self {
            orders: Mutex::new(TimedCache::with_lifespan(secs)),
            lists: Mutex::new(TimedCache::with_lifespan(secs)),
        }
    }

    /// Drop every expired entry
    pub fn purge_expired(&self) {
        lock(&self.orders).flush();
        lock(&self.lists).flush();
    }

    /// Number of stored entries, expired ones included until purged
    pub fn len(&self) -> usize {
        lock(&self.orders).cache_size() + lock(&self.lists).cache_size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TtlOrderCache {
    fn default() -> Self {
        Self::new(Duration::from_secs(TTL_SECONDS))
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl OrderCache for TtlOrderCache {
    fn get_order(&self, id: i64) -> Option<Order> {
        lock(&self.orders).cache_get(&id).cloned()
    }

    fn set_order(&self, order: &Order) {
        lock(&self.orders).cache_set(order.id, order.clone());
    }

    fn delete_order(&self, id: i64) {
        lock(&self.orders).cache_remove(&id);
    }

    fn get_orders(&self, filter: &OrderFilter) -> Option<Vec<Order>> {
        lock(&self.lists).cache_get(&filter.cache_key()).cloned()
    }

    fn set_orders(&self, filter: &OrderFilter, orders: &[Order]) {
        lock(&self.lists).cache_set(filter.cache_key(), orders.to_vec());
    }
}

/// Spawn the background sweep that purges expired entries every `interval`
pub fn spawn_janitor(cache: Arc<TtlOrderCache>, interval: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            cache.purge_expired();
            tracing::debug!("[cache] purged expired order entries");
        }
    })
}
