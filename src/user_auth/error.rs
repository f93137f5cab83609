//! Authentication gate errors
//!
//! Every rejection carries the standard `ApiResponse` envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::gateway::types::{ApiResponse, error_codes};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorCode {
    /// No `Authorization` header
    MissingAuth,
    /// Header present but not `Bearer <token>`
    InvalidFormat,
    /// Bad signature, expired, or claims missing / mistyped
    InvalidToken,
    /// Authenticated, but the role is not allowed on this route
    PermissionDenied,
}

impl AuthErrorCode {
    pub fn code(self) -> i32 {
        match self {
            Self::MissingAuth => error_codes::MISSING_AUTH,
            Self::InvalidFormat | Self::InvalidToken => error_codes::AUTH_FAILED,
            Self::PermissionDenied => error_codes::PERMISSION_DENIED,
        }
    }

    pub fn http_status(self) -> StatusCode {
        match self {
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthError {
    pub code: AuthErrorCode,
    pub message: String,
}

impl AuthError {
    pub fn new(code: AuthErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn from_code(code: AuthErrorCode) -> Self {
        let message = match code {
            AuthErrorCode::MissingAuth => "Missing Authorization header",
            AuthErrorCode::InvalidFormat => "Invalid token format",
            AuthErrorCode::InvalidToken => "Invalid or expired token",
            AuthErrorCode::PermissionDenied => "Insufficient permissions",
        };
        Self::new(code, message)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (
            self.code.http_status(),
            Json(ApiResponse::<()>::error(self.code.code(), self.message)),
        )
            .into_response()
    }
}
