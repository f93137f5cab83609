//! OpenAPI documentation
//!
//! Served as JSON at `/api-docs/openapi.json`.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::gateway::handlers::HealthResponse;
use crate::models::{NewOrder, Order, OrderUpdate, Product, ProductInput, User};
use crate::user_auth::{AuthResponse, LoginRequest, RegisterRequest};

/// JWT bearer security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by POST /login, valid for 24 hours"))
                        .build(),
                ),
            );
        }
    }
}

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Order Desk API",
        version = "0.1.0",
        description = "Orders, products and users with JWT authentication and role-based access.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        // Public endpoints
        crate::gateway::handlers::health::health_check,
        crate::user_auth::handlers::register,
        crate::user_auth::handlers::login,
        // User / Admin
        crate::gateway::handlers::order::create_order,
        crate::gateway::handlers::order::list_orders,
        crate::gateway::handlers::order::get_order,
        crate::gateway::handlers::order::update_order,
        crate::gateway::handlers::order::delete_order,
        crate::gateway::handlers::product::list_products,
        crate::gateway::handlers::product::get_product,
        // Admin
        crate::gateway::handlers::product::create_product,
        crate::gateway::handlers::product::update_product,
        crate::gateway::handlers::product::delete_product,
    ),
    components(
        schemas(
            HealthResponse,
            Order,
            NewOrder,
            OrderUpdate,
            Product,
            ProductInput,
            User,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Registration and login"),
        (name = "Orders", description = "Order lifecycle (User or Admin; delete is Admin only)"),
        (name = "Products", description = "Product catalog (writes are Admin only)"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_generates() {
        let doc = ApiDoc::openapi();
        assert_eq!(doc.info.title, "Order Desk API");
    }

    #[test]
    fn test_endpoints_registered() {
        let paths = ApiDoc::openapi().paths.paths;
        for path in ["/health", "/register", "/login", "/orders", "/orders/{id}", "/products", "/products/{id}"] {
            assert!(paths.contains_key(path), "missing {}", path);
        }
    }

    #[test]
    fn test_security_scheme_registered() {
        let components = ApiDoc::openapi().components.expect("should have components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
