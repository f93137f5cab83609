//! PostgreSQL audit log repository

use async_trait::async_trait;
use sqlx::PgPool;

use super::{AuditLogRepository, RepositoryResult};
use crate::models::{AuditLog, NewAuditLog};

pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for PgAuditLogRepository {
    async fn create(&self, entry: &NewAuditLog) -> RepositoryResult<AuditLog> {
        let row = sqlx::query_as::<_, AuditLog>(
            "INSERT INTO audit_logs (action, details, user_id) VALUES ($1, $2, $3) \
             RETURNING id, action, details, user_id, created_at",
        )
        .bind(&entry.action)
        .bind(&entry.details)
        .bind(entry.user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
