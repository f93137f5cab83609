//! User authentication
//!
//! - [`password`]: Argon2 hashing
//! - [`jwt`]: HS256 bearer tokens
//! - [`service`]: registration and login
//! - [`middleware`]: token gate and role gate
//! - [`handlers`]: `/register` and `/login`

pub mod error;
pub mod handlers;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod service;
pub mod users;

pub use error::{AuthError, AuthErrorCode};
pub use jwt::{Claims, JwtService};
pub use middleware::{Identity, jwt_auth_middleware, require_roles};
pub use service::{AuthResponse, AuthService, LoginRequest, RegisterRequest};
pub use users::UserService;
