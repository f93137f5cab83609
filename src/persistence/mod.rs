//! Data store gateways
//!
//! One repository per entity. The PostgreSQL implementations live in
//! `orders`, `products`, `users` and `audit_logs`; `memory` holds in-process
//! equivalents used by tests and by `main` when no database is configured.

pub mod audit_logs;
pub mod memory;
pub mod orders;
pub mod products;
pub mod repository;
pub mod schema;
pub mod users;

use thiserror::Error;

pub use audit_logs::PgAuditLogRepository;
pub use orders::PgOrderRepository;
pub use products::PgProductRepository;
pub use repository::{AuditLogRepository, OrderRepository, ProductRepository, UserRepository};
pub use users::PgUserRepository;

/// Errors surfaced by every repository
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// The targeted row does not exist (or is soft-deleted)
    #[error("record not found")]
    NotFound,

    /// A unique constraint rejected the write
    #[error("duplicate record: {0}")]
    Duplicate(String),

    /// A foreign key pointed at a missing row
    #[error("dangling reference: {0}")]
    InvalidReference(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound,
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                RepositoryError::Duplicate(db_err.message().to_string())
            }
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                RepositoryError::InvalidReference(db_err.message().to_string())
            }
            other => RepositoryError::Database(other),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
