//! Authentication and role gates
//!
//! `jwt_auth_middleware` turns a bearer token into an [`Identity`] request
//! extension; `require_roles` checks that identity against a route's
//! allow-list.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};

use super::error::{AuthError, AuthErrorCode};
use super::jwt::Claims;
use crate::gateway::state::AppState;

/// Authenticated caller, as asserted by a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
    pub role: String,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
            role: claims.role,
        }
    }
}

/// Extract the token from an `Authorization: Bearer <token>` value
fn bearer_token(value: &str) -> Option<&str> {
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    // 1. Extract Authorization header
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AuthError::from_code(AuthErrorCode::MissingAuth))?;

    let token = bearer_token(auth_header)
        .ok_or_else(|| AuthError::from_code(AuthErrorCode::InvalidFormat))?;

    // 2. Verify token
    let claims = state.jwt.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "token rejected");
        AuthError::from_code(AuthErrorCode::InvalidToken)
    })?;
    let identity = Identity::from(claims);
    let user_id = identity.user_id;

    // 3. Inject identity
    request.extensions_mut().insert(identity);
    let mut response = next.run(request).await;

    let cookie = format!("user_id={}; Path=/; HttpOnly; Secure; SameSite=Strict", user_id);
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().append(header::SET_COOKIE, value);
    }
    Ok(response)
}

/// Role gate for a group of routes
///
/// Must run after [`jwt_auth_middleware`]. 401 without an [`Identity`],
/// 403 when its role is not in `allowed`.
pub fn require_roles(
    allowed: &'static [&'static str],
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Result<Response, AuthError>> + Send>> + Clone
{
    move |req: Request, next: Next| {
        Box::pin(async move {
            let identity = req
                .extensions()
                .get::<Identity>()
                .ok_or_else(|| AuthError::from_code(AuthErrorCode::MissingAuth))?;

            if !allowed.contains(&identity.role.as_str()) {
                tracing::warn!(
                    user_id = identity.user_id,
                    role = %identity.role,
                    path = %req.uri().path(),
                    "permission denied"
                );
                return Err(AuthError::from_code(AuthErrorCode::PermissionDenied));
            }

            Ok(next.run(req).await)
        })
    }
}
