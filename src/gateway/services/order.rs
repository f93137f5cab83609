//! Order Service - order lifecycle coordination
//!
//! Write path: validate, persist, refresh the cache, then emit a status-change
//! event when the status moved. Read path: cache first, repository on miss.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use validator::Validate;

use super::{ServiceError, ServiceResult};
use crate::events::StatusChangeNotifier;
use crate::gateway::cache::OrderCache;
use crate::models::{NewOrder, Order, OrderFilter, OrderUpdate};
use crate::persistence::{OrderRepository, RepositoryError};

pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
    cache: Arc<dyn OrderCache>,
    notifier: Arc<dyn StatusChangeNotifier>,
}

impl OrderService {
    pub fn new(
        repo: Arc<dyn OrderRepository>,
        cache: Arc<dyn OrderCache>,
        notifier: Arc<dyn StatusChangeNotifier>,
    ) -> Self {
        Self {
            repo,
            cache,
            notifier,
        }
    }

    /// Validate and persist a new order; the cache is left untouched
    pub async fn create_order(&self, req: NewOrder) -> ServiceResult<Order> {
        check_order(&req, req.total_price)?;

        let order = self.repo.create(&req).await.map_err(|e| match e {
            RepositoryError::InvalidReference(_) => ServiceError::UnknownProduct(req.product_id),
            other => other.into(),
        })?;
        tracing::info!(order_id = order.id, status = %order.status, "order created");
        Ok(order)
    }

    /// Overwrite name, status and price of a live order
    pub async fn update_order(&self, id: i64, changes: OrderUpdate) -> ServiceResult<Order> {
        check_order(&changes, changes.total_price)?;

        let existing = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::OrderNotFound(id))?;
        let old_status = existing.status;

        let updated = self
            .repo
            .update(id, &changes, Utc::now())
            .await
            .map_err(|e| not_found_as(e, id))?;

        self.cache.set_order(&updated);

        if old_status != updated.status {
            tracing::info!(order_id = id, from = %old_status, to = %updated.status, "order status changed");
            self.notifier
                .order_status_changed(id, &old_status, &updated.status);
        }
        Ok(updated)
    }

    /// Soft-delete a live order and evict it from the cache
    pub async fn delete_order(&self, id: i64) -> ServiceResult<()> {
        self.repo
            .soft_delete(id)
            .await
            .map_err(|e| not_found_as(e, id))?;
        self.cache.delete_order(id);
        tracing::info!(order_id = id, "order deleted");
        Ok(())
    }

    pub async fn get_order_by_id(&self, id: i64) -> ServiceResult<Order> {
        if let Some(order) = self.cache.get_order(id) {
            tracing::debug!(order_id = id, "order cache hit");
            return Ok(order);
        }

        let order = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::OrderNotFound(id))?;
        self.cache.set_order(&order);
        Ok(order)
    }

    /// Filtered listing, cached per filter key
    pub async fn get_orders_by_filters(&self, filter: &OrderFilter) -> ServiceResult<Vec<Order>> {
        if let Some(orders) = self.cache.get_orders(filter) {
            tracing::debug!(key = %filter.cache_key(), "order list cache hit");
            return Ok(orders);
        }

        let orders = self.repo.list(filter).await?;
        self.cache.set_orders(filter, &orders);
        Ok(orders)
    }
}

/// Field rules come from the `Validate` derive; price is checked here
fn check_order(req: &impl Validate, total_price: Decimal) -> ServiceResult<()> {
    if req.validate().is_err() || total_price <= Decimal::ZERO {
        return Err(ServiceError::InvalidOrderData);
    }
    Ok(())
}

fn not_found_as(err: RepositoryError, id: i64) -> ServiceError {
    match err {
        RepositoryError::NotFound => ServiceError::OrderNotFound(id),
        other => ServiceError::Repository(other),
    }
}
