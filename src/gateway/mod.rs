pub mod cache;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod services;
pub mod state;
pub mod types;

use anyhow::Context;
use axum::{
    Json, Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use utoipa::OpenApi;

use crate::models::roles::{ADMIN, USER};
use crate::user_auth::{self, jwt_auth_middleware, require_roles};
use openapi::ApiDoc;
use state::AppState;

const MEMBER_ROLES: &[&str] = &[USER, ADMIN];
const ADMIN_ROLES: &[&str] = &[ADMIN];

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full HTTP router
///
/// Public: `/register`, `/login`, `/health`, `/api-docs/openapi.json`.
/// Everything else passes the JWT gate. Product reads are open to any
/// authenticated role; the rest also pass a role gate.
pub fn build_router(state: Arc<AppState>) -> Router {
    let member_routes = Router::new()
        .route(
            "/orders",
            post(handlers::create_order).get(handlers::list_orders),
        )
        .route(
            "/orders/{id}",
            get(handlers::get_order).put(handlers::update_order),
        )
        .route_layer(from_fn(require_roles(MEMBER_ROLES)));

    let catalog_routes = Router::new()
        .route("/products", get(handlers::list_products))
        .route("/products/{id}", get(handlers::get_product));

    let admin_routes = Router::new()
        .route("/orders/{id}", delete(handlers::delete_order))
        .route("/products", post(handlers::create_product))
        .route(
            "/products/{id}",
            put(handlers::update_product).delete(handlers::delete_product),
        )
        .route_layer(from_fn(require_roles(ADMIN_ROLES)));

    // route_layer keeps unmatched paths a plain 404 instead of a 401
    let protected = member_routes
        .merge(catalog_routes)
        .merge(admin_routes)
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    Router::new()
        .route("/register", post(user_auth::handlers::register))
        .route("/login", post(user_auth::handlers::login))
        .route("/health", get(handlers::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(protected)
        .with_state(state)
}

/// Start HTTP Gateway server
pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = build_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("🚀 Order desk listening on http://{}", addr);
    tracing::info!("📖 OpenAPI document at http://{}/api-docs/openapi.json", addr);

    axum::serve(listener, app).await.context("HTTP server error")?;
    Ok(())
}
