//! Registration and login

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::jwt::JwtService;
use super::password::{hash_password, verify_password};
use super::users::UserService;
use crate::gateway::services::{ServiceError, ServiceResult};
use crate::models::{NewUser, User, roles};

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("valid regex"));

/// User Registration Request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50))]
    #[schema(example = "alice")]
    pub username: String,
    #[validate(length(min = 6))]
    #[schema(example = "secret12")]
    pub password: String,
    /// Defaults to `User` when empty
    #[serde(default)]
    #[schema(example = "User")]
    pub role: String,
}

/// User Login Request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "alice")]
    pub username: String,
    #[serde(default)]
    #[schema(example = "secret12")]
    pub password: String,
}

/// Auth Response (JWT)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    pub role: String,
}

pub struct AuthService {
    users: Arc<UserService>,
    jwt: Arc<JwtService>,
}

impl AuthService {
    pub fn new(users: Arc<UserService>, jwt: Arc<JwtService>) -> Self {
        Self { users, jwt }
    }

    /// Register a new user
    pub async fn register(&self, req: RegisterRequest) -> ServiceResult<User> {
        if let Err(errors) = req.validate() {
            let fields = errors.field_errors();
            return Err(if fields.contains_key("username") {
                ServiceError::InvalidUsername
            } else {
                ServiceError::PasswordTooShort
            });
        }
        if !USERNAME_RE.is_match(&req.username) {
            return Err(ServiceError::InvalidUsername);
        }

        if self.users.find_by_username(&req.username).await?.is_some() {
            return Err(ServiceError::UsernameTaken);
        }

        let password_hash = hash_password(&req.password)
            .map_err(|e| ServiceError::Internal(format!("hashing failed: {}", e)))?;
        let role = if req.role.is_empty() {
            roles::USER.to_string()
        } else {
            req.role
        };

        // a concurrent registration can still win; create_user reports it as UsernameTaken
        let user = self
            .users
            .create_user(NewUser {
                username: req.username,
                password_hash,
                role,
            })
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, role = %user.role, "user registered");
        Ok(user)
    }

    /// Login user and issue JWT
    pub async fn login(&self, req: LoginRequest) -> ServiceResult<AuthResponse> {
        if req.username.is_empty() || req.password.is_empty() {
            return Err(ServiceError::EmptyCredentials);
        }

        let user = self
            .users
            .find_by_username(&req.username)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        if !verify_password(&req.password, &user.password_hash) {
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self
            .jwt
            .issue(&user)
            .map_err(|e| ServiceError::Internal(format!("failed to generate token: {}", e)))?;

        Ok(AuthResponse {
            token,
            user_id: user.id,
            username: user.username,
            role: user.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::memory::InMemoryUserRepository;

    fn service() -> (AuthService, Arc<JwtService>) {
        let jwt = Arc::new(JwtService::new("test-secret"));
        let users = Arc::new(UserService::new(Arc::new(InMemoryUserRepository::new())));
        let svc = AuthService::new(users, jwt.clone());
        (svc, jwt)
    }

    fn register(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            role: String::new(),
        }
    }

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password_and_defaults_role() {
        let (svc, _) = service();
        let user = svc.register(register("alice", "secret12")).await.unwrap();
        assert_eq!(user.role, "User");
        assert_ne!(user.password_hash, "secret12");
        assert!(verify_password("secret12", &user.password_hash));
    }

    #[tokio::test]
    async fn test_register_rejects_bad_input() {
        let (svc, _) = service();
        let too_long = "a".repeat(51);
        for name in ["", "bad name", "semi;colon", too_long.as_str()] {
            assert!(matches!(
                svc.register(register(name, "secret12")).await,
                Err(ServiceError::InvalidUsername)
            ));
        }
        assert!(matches!(
            svc.register(register("alice", "12345")).await,
            Err(ServiceError::PasswordTooShort)
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let (svc, _) = service();
        svc.register(register("alice", "secret12")).await.unwrap();
        assert!(matches!(
            svc.register(register("alice", "another1")).await,
            Err(ServiceError::UsernameTaken)
        ));
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let (svc, jwt) = service();
        let user = svc.register(register("alice", "secret12")).await.unwrap();

        let resp = svc.login(login("alice", "secret12")).await.unwrap();

        let claims = jwt.verify(&resp.token).unwrap();
        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.role, "User");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (svc, _) = service();
        svc.register(register("alice", "secret12")).await.unwrap();

        let wrong_password = svc.login(login("alice", "wrong123")).await.unwrap_err();
        let unknown_user = svc.login(login("mallory", "secret12")).await.unwrap_err();

        assert!(matches!(wrong_password, ServiceError::InvalidCredentials));
        assert!(matches!(unknown_user, ServiceError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let (svc, _) = service();
        assert!(matches!(
            svc.login(login("", "secret12")).await,
            Err(ServiceError::EmptyCredentials)
        ));
        assert!(matches!(
            svc.login(login("alice", "")).await,
            Err(ServiceError::EmptyCredentials)
        ));
    }
}
