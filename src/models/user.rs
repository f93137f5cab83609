//! User accounts

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Role names understood by the role gate
pub mod roles {
    pub const USER: &str = "User";
    pub const ADMIN: &str = "Admin";
}

/// A registered user
///
/// The password hash is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    #[schema(example = "alice")]
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    #[schema(example = "User")]
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for `users`; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: String,
}
