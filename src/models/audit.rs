use chrono::{DateTime, Utc};
use serde::Serialize;

/// One row of `audit_logs`
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct AuditLog {
    pub id: i64,
    pub action: String,
    pub details: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAuditLog {
    pub action: String,
    pub details: String,
    pub user_id: i64,
}
