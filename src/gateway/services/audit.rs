//! Audit Service - records who did what to which order

use std::sync::Arc;

use super::{ServiceError, ServiceResult};
use crate::models::{AuditLog, NewAuditLog};
use crate::persistence::AuditLogRepository;

pub mod actions {
    pub const CREATE_ORDER: &str = "create_order";
    pub const UPDATE_ORDER: &str = "update_order";
    pub const DELETE_ORDER: &str = "delete_order";
}

pub struct AuditService {
    repo: Arc<dyn AuditLogRepository>,
}

impl AuditService {
    pub fn new(repo: Arc<dyn AuditLogRepository>) -> Self {
        Self { repo }
    }

    pub async fn record(&self, action: &str, details: &str, user_id: i64) -> ServiceResult<AuditLog> {
        let entry = NewAuditLog {
            action: action.to_string(),
            details: details.to_string(),
            user_id,
        };
        self.repo.create(&entry).await.map_err(ServiceError::AuditLog)
    }

    /// Write an entry on a detached task; failures are only logged
    pub fn record_detached(self: &Arc<Self>, action: &'static str, details: String, user_id: i64) {
        let audit = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = audit.record(action, &details, user_id).await {
                tracing::warn!(action, user_id, error = %e, "audit entry dropped");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::memory::InMemoryAuditLogRepository;
    use crate::persistence::{RepositoryError, RepositoryResult};
    use async_trait::async_trait;

    struct BrokenRepo;

    #[async_trait]
    impl AuditLogRepository for BrokenRepo {
        async fn create(&self, _entry: &NewAuditLog) -> RepositoryResult<AuditLog> {
            Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    #[tokio::test]
    async fn test_record_persists_entry() {
        let repo = Arc::new(InMemoryAuditLogRepository::new());
        let audit = AuditService::new(repo.clone());

        let entry = audit
            .record(actions::CREATE_ORDER, "Order created successfully", 3)
            .await
            .unwrap();

        assert_eq!(entry.action, "create_order");
        assert_eq!(repo.entries(), vec![entry]);
    }

    #[tokio::test]
    async fn test_record_failure_is_wrapped() {
        let audit = AuditService::new(Arc::new(BrokenRepo));
        let err = audit
            .record(actions::DELETE_ORDER, "Order deleted successfully", 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::AuditLog(_)));
        assert!(err.to_string().starts_with("failed to create log"));
    }
}
