//! User lookups shared by auth and handlers

use std::sync::Arc;

use crate::gateway::services::{ServiceError, ServiceResult};
use crate::models::{NewUser, User};
use crate::persistence::{RepositoryError, UserRepository};

pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Persist a user whose password is already hashed
    pub async fn create_user(&self, user: NewUser) -> ServiceResult<User> {
        self.repo.create(&user).await.map_err(|e| match e {
            RepositoryError::Duplicate(_) => ServiceError::UsernameTaken,
            other => other.into(),
        })
    }

    pub async fn get_user_by_id(&self, id: i64) -> ServiceResult<User> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::UserNotFound)
    }

    pub async fn get_user_by_username(&self, username: &str) -> ServiceResult<User> {
        self.find_by_username(username)
            .await?
            .ok_or(ServiceError::UserNotFound)
    }

    /// Like [`Self::get_user_by_username`] but absence is not an error
    pub async fn find_by_username(&self, username: &str) -> ServiceResult<Option<User>> {
        Ok(self.repo.get_by_username(username).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::memory::InMemoryUserRepository;

    #[tokio::test]
    async fn test_lookup_by_id_and_username() {
        let svc = UserService::new(Arc::new(InMemoryUserRepository::new()));
        let created = svc
            .create_user(NewUser {
                username: "bob".to_string(),
                password_hash: "hash".to_string(),
                role: "Admin".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(svc.get_user_by_id(created.id).await.unwrap(), created);
        assert_eq!(svc.get_user_by_username("bob").await.unwrap(), created);
        assert!(matches!(
            svc.get_user_by_username("nobody").await,
            Err(ServiceError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_taken() {
        let svc = UserService::new(Arc::new(InMemoryUserRepository::new()));
        let user = NewUser {
            username: "bob".to_string(),
            password_hash: "hash".to_string(),
            role: "User".to_string(),
        };
        svc.create_user(user.clone()).await.unwrap();
        assert!(matches!(
            svc.create_user(user).await,
            Err(ServiceError::UsernameTaken)
        ));
    }
}
