//! Order records and order request payloads

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Status assigned to a new order when the client does not provide one
pub const DEFAULT_ORDER_STATUS: &str = "pending";

/// A customer's order as persisted in `orders`
///
/// `is_deleted` is the soft-delete flag. Repositories never return rows
/// where it is set, so every `Order` seen above the persistence layer is live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Order {
    #[schema(example = 42)]
    pub id: i64,
    #[schema(example = "Bob")]
    pub customer_name: String,
    #[schema(example = "pending")]
    pub status: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 9.99)]
    pub total_price: Decimal,
    #[schema(example = 1)]
    pub product_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub is_deleted: bool,
}

/// Create order request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewOrder {
    #[validate(length(min = 1))]
    #[schema(example = "Bob")]
    pub customer_name: String,
    /// Optional; defaults to `pending`
    #[serde(default)]
    #[schema(example = "pending")]
    pub status: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 9.99)]
    pub total_price: Decimal,
    #[validate(range(min = 1))]
    #[schema(example = 1)]
    pub product_id: i64,
}

impl NewOrder {
    /// Status to persist, falling back to [`DEFAULT_ORDER_STATUS`]
    pub fn effective_status(&self) -> &str {
        if self.status.is_empty() {
            DEFAULT_ORDER_STATUS
        } else {
            &self.status
        }
    }
}

/// Update order request
///
/// The product reference is fixed at creation and cannot be changed.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct OrderUpdate {
    #[validate(length(min = 1))]
    #[schema(example = "Bob")]
    pub customer_name: String,
    #[schema(example = "completed")]
    pub status: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 12.5)]
    pub total_price: Decimal,
}

/// Filter for `GET /orders`
///
/// An empty status and non-positive bounds are treated as "unset", so a
/// bound of exactly zero never filters anything.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderFilter {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    #[param(value_type = f64)]
    pub min_price: Decimal,
    #[serde(default)]
    #[param(value_type = f64)]
    pub max_price: Decimal,
}

impl OrderFilter {
    pub fn status(&self) -> Option<&str> {
        (!self.status.is_empty()).then_some(self.status.as_str())
    }

    pub fn min_price(&self) -> Option<Decimal> {
        (self.min_price > Decimal::ZERO).then_some(self.min_price)
    }

    pub fn max_price(&self) -> Option<Decimal> {
        (self.max_price > Decimal::ZERO).then_some(self.max_price)
    }

    /// Composite cache key: `{status}_{min_price}_{max_price}`
    ///
    /// Bounds are normalized so `25` and `25.0` share an entry.
    pub fn cache_key(&self) -> String {
        format!(
            "{}_{}_{}",
            self.status,
            self.min_price.normalize(),
            self.max_price.normalize()
        )
    }

    /// Whether `order` passes every active criterion
    pub fn matches(&self, order: &Order) -> bool {
        if let Some(status) = self.status() {
            if order.status != status {
                return false;
            }
        }
        if let Some(min) = self.min_price() {
            if order.total_price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price() {
            if order.total_price > max {
                return false;
            }
        }
        true
    }
}
