//! Order handlers (create, list, get, update, delete)

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};

use super::super::error::{ApiError, ApiResult, created, ok};
use super::super::services::audit::actions;
use super::super::state::AppState;
use super::super::types::ApiResponse;
use crate::models::{NewOrder, Order, OrderFilter, OrderUpdate};
use crate::user_auth::Identity;

/// Create order endpoint
///
/// POST /orders
#[utoipa::path(
    post,
    path = "/orders",
    request_body = NewOrder,
    responses(
        (status = 201, description = "Order created", body = ApiResponse<Order>),
        (status = 400, description = "Invalid order data or unknown product"),
        (status = 401, description = "Authentication failed"),
        (status = 403, description = "Role not allowed")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    payload: Result<Json<NewOrder>, JsonRejection>,
) -> ApiResult<Order> {
    let Json(req) = payload?;
    let order = state.orders.create_order(req).await?;

    state.audit.record_detached(
        actions::CREATE_ORDER,
        "Order created successfully".to_string(),
        identity.user_id,
    );
    created(order)
}

/// List orders endpoint
///
/// GET /orders?status=&min_price=&max_price=
#[utoipa::path(
    get,
    path = "/orders",
    params(OrderFilter),
    responses(
        (status = 200, description = "Matching orders", body = ApiResponse<Vec<Order>>),
        (status = 400, description = "Malformed query"),
        (status = 401, description = "Authentication failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<Arc<AppState>>,
    query: Result<Query<OrderFilter>, QueryRejection>,
) -> ApiResult<Vec<Order>> {
    let Query(filter) = query?;
    let orders = state.orders.get_orders_by_filters(&filter).await?;
    ok(orders)
}

/// Get order endpoint
///
/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order found", body = ApiResponse<Order>),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Order> {
    let Path(id) = id?;
    let order = state.orders.get_order_by_id(id).await?;
    ok(order)
}

/// Update order endpoint
///
/// PUT /orders/{id}
#[utoipa::path(
    put,
    path = "/orders/{id}",
    params(("id" = i64, Path, description = "Order ID")),
    request_body = OrderUpdate,
    responses(
        (status = 200, description = "Order updated", body = ApiResponse<Order>),
        (status = 400, description = "Invalid order data"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn update_order(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<OrderUpdate>, JsonRejection>,
) -> ApiResult<Order> {
    let Path(id) = id?;
    let Json(changes) = payload?;
    let order = state.orders.update_order(id, changes).await?;

    state.audit.record_detached(
        actions::UPDATE_ORDER,
        "Order updated successfully".to_string(),
        identity.user_id,
    );
    ok(order)
}

/// Delete order endpoint (Admin)
///
/// DELETE /orders/{id}
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(("id" = i64, Path, description = "Order ID")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.orders.delete_order(id).await?;

    state.audit.record_detached(
        actions::DELETE_ORDER,
        "Order deleted successfully".to_string(),
        identity.user_id,
    );
    Ok(StatusCode::NO_CONTENT)
}
