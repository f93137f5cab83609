#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;

use order_desk::events::StatusChangeNotifier;
use order_desk::gateway::cache::TtlOrderCache;
use order_desk::models::User;
use order_desk::user_auth::JwtService;
use order_desk::{AppState, Repositories, build_router};

pub const SECRET: &str = "integration-test-secret";

#[derive(Default)]
pub struct RecordingNotifier {
    pub events: Mutex<Vec<(i64, String, String)>>,
}

impl StatusChangeNotifier for RecordingNotifier {
    fn order_status_changed(&self, order_id: i64, old_status: &str, new_status: &str) {
        self.events
            .lock()
            .unwrap()
            .push((order_id, old_status.to_string(), new_status.to_string()));
    }
}

pub struct TestApp {
    pub router: Router,
    pub jwt: Arc<JwtService>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestApp {
    pub fn new() -> Self {
        let jwt = Arc::new(JwtService::new(SECRET));
        let notifier = Arc::new(RecordingNotifier::default());
        let state = AppState::new(
            Repositories::in_memory(),
            Arc::new(TtlOrderCache::default()),
            notifier.clone(),
            jwt.clone(),
            None,
        );
        Self {
            router: build_router(Arc::new(state)),
            jwt,
            notifier,
        }
    }

    /// Token for a user that need not exist in the store
    pub fn token_for(&self, user_id: i64, role: &str) -> String {
        let user = User {
            id: user_id,
            username: format!("user{}", user_id),
            password_hash: String::new(),
            role: role.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.jwt.issue(&user).unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> (Response<Body>, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let (parts, body) = response.into_parts();
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (Response::from_parts(parts, Body::empty()), json)
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn empty_request(method: &str, uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}
