//! Gateway Services Layer
//!
//! Business rules for orders, products and audit entries. Handlers are thin
//! HTTP adapters that delegate here and translate [`ServiceError`].

pub mod audit;
pub mod order;
pub mod product;

pub use audit::AuditService;
pub use order::OrderService;
pub use product::ProductService;

use axum::http::StatusCode;
use thiserror::Error;

use crate::gateway::types::error_codes;
use crate::persistence::RepositoryError;

/// Errors returned by the domain services
#[derive(Error, Debug)]
pub enum ServiceError {
    // === Validation Errors ===
    #[error("invalid order data")]
    InvalidOrderData,

    #[error("invalid product data")]
    InvalidProductData,

    #[error("username must be letters, digits or underscores")]
    InvalidUsername,

    #[error("password must be at least 6 characters")]
    PasswordTooShort,

    #[error("username and password are required")]
    EmptyCredentials,

    #[error("product does not exist")]
    UnknownProduct(i64),

    // === Auth Errors ===
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("username already exists")]
    UsernameTaken,

    #[error("product is referenced by orders")]
    ProductInUse(i64),

    // === Lookup Errors ===
    #[error("order not found")]
    OrderNotFound(i64),

    #[error("product not found")]
    ProductNotFound(i64),

    #[error("user not found")]
    UserNotFound,

    // === System Errors ===
    #[error("failed to create log: {0}")]
    AuditLog(#[source] RepositoryError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// API error code for the response envelope
    pub fn code(&self) -> i32 {
        match self {
            ServiceError::InvalidOrderData => error_codes::INVALID_ORDER_DATA,
            ServiceError::InvalidProductData => error_codes::INVALID_PRODUCT_DATA,
            ServiceError::InvalidUsername => error_codes::INVALID_USERNAME,
            ServiceError::PasswordTooShort => error_codes::PASSWORD_TOO_SHORT,
            ServiceError::EmptyCredentials => error_codes::INVALID_PARAMETER,
            ServiceError::InvalidCredentials => error_codes::AUTH_FAILED,
            ServiceError::UnknownProduct(_) => error_codes::UNKNOWN_PRODUCT,
            ServiceError::UsernameTaken => error_codes::USERNAME_TAKEN,
            ServiceError::ProductInUse(_) => error_codes::PRODUCT_IN_USE,
            ServiceError::OrderNotFound(_) => error_codes::ORDER_NOT_FOUND,
            ServiceError::ProductNotFound(_) => error_codes::PRODUCT_NOT_FOUND,
            ServiceError::UserNotFound => error_codes::USER_NOT_FOUND,
            ServiceError::Repository(RepositoryError::NotFound) => error_codes::NOT_FOUND,
            ServiceError::Repository(RepositoryError::Duplicate(_)) => error_codes::USERNAME_TAKEN,
            ServiceError::Repository(RepositoryError::InvalidReference(_)) => {
                error_codes::INVALID_PARAMETER
            }
            ServiceError::Repository(RepositoryError::Database(_))
            | ServiceError::AuditLog(_)
            | ServiceError::Internal(_) => error_codes::INTERNAL_ERROR,
        }
    }

    /// HTTP status for this error
    pub fn http_status(&self) -> StatusCode {
        match self {
            ServiceError::InvalidOrderData
            | ServiceError::InvalidProductData
            | ServiceError::InvalidUsername
            | ServiceError::PasswordTooShort
            | ServiceError::EmptyCredentials
            | ServiceError::UnknownProduct(_)
            | ServiceError::Repository(RepositoryError::InvalidReference(_)) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ServiceError::UsernameTaken
            | ServiceError::ProductInUse(_)
            | ServiceError::Repository(RepositoryError::Duplicate(_)) => StatusCode::CONFLICT,
            ServiceError::OrderNotFound(_)
            | ServiceError::ProductNotFound(_)
            | ServiceError::UserNotFound
            | ServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            ServiceError::Repository(RepositoryError::Database(_))
            | ServiceError::AuditLog(_)
            | ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to clients
    ///
    /// Server faults and raw constraint violations stay generic; their
    /// database text only goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            _ if self.http_status().is_server_error() => "internal server error".to_string(),
            ServiceError::Repository(RepositoryError::Duplicate(_)) => {
                "record already exists".to_string()
            }
            ServiceError::Repository(RepositoryError::InvalidReference(_)) => {
                "referenced record does not exist".to_string()
            }
            _ => self.to_string(),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_variants_map_to_404() {
        assert_eq!(ServiceError::OrderNotFound(1).http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ServiceError::ProductNotFound(1).http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ServiceError::Repository(RepositoryError::NotFound).http_status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = ServiceError::AuditLog(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        assert!(err.to_string().starts_with("failed to create log"));
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "internal server error");
    }

    #[test]
    fn test_invalid_credentials_message_is_generic() {
        let err = ServiceError::InvalidCredentials;
        assert_eq!(err.http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.public_message(), "invalid credentials");
    }

    #[test]
    fn test_constraint_violations_hide_database_text() {
        let raw = "update or delete on table \"products\" violates foreign key constraint";
        let err = ServiceError::Repository(RepositoryError::InvalidReference(raw.to_string()));
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        assert!(!err.public_message().contains("products"));

        let err = ServiceError::Repository(RepositoryError::Duplicate(raw.to_string()));
        assert_eq!(err.http_status(), StatusCode::CONFLICT);
        assert_eq!(err.public_message(), "record already exists");
    }

    #[test]
    fn test_product_reference_errors() {
        let missing = ServiceError::UnknownProduct(7);
        assert_eq!(missing.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.code(), error_codes::UNKNOWN_PRODUCT);

        let in_use = ServiceError::ProductInUse(7);
        assert_eq!(in_use.http_status(), StatusCode::CONFLICT);
        assert_eq!(in_use.public_message(), "product is referenced by orders");
    }
}
