mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

use common::{TestApp, empty_request, json_request};

async fn register(app: &TestApp, username: &str, password: &str, role: &str) -> (StatusCode, Value) {
    let (resp, body) = app
        .send(json_request(
            "POST",
            "/register",
            None,
            &json!({"username": username, "password": password, "role": role}),
        ))
        .await;
    (resp.status(), body)
}

async fn login(app: &TestApp, username: &str, password: &str) -> (StatusCode, Value) {
    let (resp, body) = app
        .send(json_request(
            "POST",
            "/login",
            None,
            &json!({"username": username, "password": password}),
        ))
        .await;
    (resp.status(), body)
}

async fn token(app: &TestApp, username: &str, password: &str, role: &str) -> String {
    let (status, _) = register(app, username, password, role).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = login(app, username, password).await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_register_and_login() {
    let app = TestApp::new();

    let (status, body) = register(&app, "alice", "secret12", "").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["role"], "User");
    assert!(body["data"].get("password_hash").is_none());

    let (status, body) = login(&app, "alice", "secret12").await;
    assert_eq!(status, StatusCode::OK);
    let token = body["data"]["token"].as_str().unwrap();
    assert!(!token.is_empty());
    let claims = app.jwt.verify(token).unwrap();
    assert_eq!(claims.username, "alice");
}

#[tokio::test]
async fn test_login_failures_look_identical() {
    let app = TestApp::new();
    register(&app, "alice", "secret12", "").await;

    let (wrong_status, wrong_body) = login(&app, "alice", "wrongpass").await;
    let (unknown_status, unknown_body) = login(&app, "nobody", "secret12").await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
}

#[tokio::test]
async fn test_register_rejections() {
    let app = TestApp::new();
    register(&app, "alice", "secret12", "").await;

    let (status, _) = register(&app, "alice", "another12", "").await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = register(&app, "bad name!", "secret12", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = register(&app, "bob", "12345", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = login(&app, "", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

async fn create_widget(app: &TestApp, admin: &str) -> i64 {
    let (resp, body) = app
        .send(json_request(
            "POST",
            "/products",
            Some(admin),
            &json!({"name": "Widget", "price": 9.99, "quantity": 10}),
        ))
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_product_then_order_round_trip() {
    let app = TestApp::new();
    let admin = token(&app, "boss", "secret12", "Admin").await;
    let user = token(&app, "alice", "secret12", "User").await;

    let (resp, body) = app
        .send(json_request(
            "POST",
            "/products",
            Some(&admin),
            &json!({"name": "Widget", "price": 9.99, "quantity": 10}),
        ))
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let product_id = body["data"]["id"].as_i64().unwrap();

    let (resp, body) = app
        .send(json_request(
            "POST",
            "/orders",
            Some(&user),
            &json!({"customer_name": "Bob", "status": "pending", "total_price": 9.99, "product_id": product_id}),
        ))
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body["data"].clone();
    let order_id = created["id"].as_i64().unwrap();
    assert_eq!(created["customer_name"], "Bob");
    assert_eq!(created["total_price"].as_f64(), Some(9.99));

    let (resp, body) = app
        .send(empty_request(
            "GET",
            &format!("/orders/{}", order_id),
            Some(&format!("Bearer {}", user)),
        ))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body["data"], created);
}

#[tokio::test]
async fn test_order_lifecycle_over_http() {
    let app = TestApp::new();
    let admin = app.token_for(1, "Admin");
    let user = app.token_for(2, "User");
    let product_id = create_widget(&app, &admin).await;

    let (_, body) = app
        .send(json_request(
            "POST",
            "/orders",
            Some(&user),
            &json!({"customer_name": "Bob", "total_price": 20.0, "product_id": product_id}),
        ))
        .await;
    assert_eq!(body["data"]["status"], "pending");
    let order_id = body["data"]["id"].as_i64().unwrap();
    let uri = format!("/orders/{}", order_id);

    let (resp, body) = app
        .send(json_request(
            "PUT",
            &uri,
            Some(&user),
            &json!({"customer_name": "Bob", "status": "completed", "total_price": 25.5}),
        ))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body["data"]["status"], "completed");
    assert_eq!(
        *app.notifier.events.lock().unwrap(),
        vec![(order_id, "pending".to_string(), "completed".to_string())]
    );

    let (resp, body) = app
        .send(empty_request(
            "GET",
            "/orders?status=completed&min_price=25",
            Some(&format!("Bearer {}", user)),
        ))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));

    let (resp, body) = app
        .send(empty_request("DELETE", &uri, Some(&format!("Bearer {}", admin))))
        .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (resp, _) = app
        .send(empty_request("GET", &uri, Some(&format!("Bearer {}", user))))
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let (resp, _) = app
        .send(empty_request("DELETE", &uri, Some(&format!("Bearer {}", admin))))
        .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_input_is_400() {
    let app = TestApp::new();
    let user = app.token_for(2, "User");

    let (resp, body) = app
        .send(json_request(
            "POST",
            "/orders",
            Some(&user),
            &json!({"customer_name": "", "total_price": 5.0, "product_id": 1}),
        ))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "invalid order data");

    let (resp, body) = app
        .send(json_request("POST", "/orders", Some(&user), &json!({"customer_name": 5})))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);

    let (resp, _) = app
        .send(empty_request(
            "GET",
            "/orders/not-a-number",
            Some(&format!("Bearer {}", user)),
        ))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let (resp, _) = app
        .send(empty_request(
            "GET",
            "/orders?min_price=cheap",
            Some(&format!("Bearer {}", user)),
        ))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_order_for_missing_product_is_400() {
    let app = TestApp::new();
    let user = app.token_for(2, "User");

    let (resp, body) = app
        .send(json_request(
            "POST",
            "/orders",
            Some(&user),
            &json!({"customer_name": "Bob", "total_price": 5.0, "product_id": 999_999}),
        ))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1006);
    assert_eq!(body["msg"], "product does not exist");
}

#[tokio::test]
async fn test_deleting_ordered_product_is_409() {
    let app = TestApp::new();
    let admin = app.token_for(1, "Admin");
    let product_id = create_widget(&app, &admin).await;

    let (resp, _) = app
        .send(json_request(
            "POST",
            "/orders",
            Some(&admin),
            &json!({"customer_name": "Bob", "total_price": 5.0, "product_id": product_id}),
        ))
        .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let uri = format!("/products/{}", product_id);
    let (resp, body) = app
        .send(empty_request("DELETE", &uri, Some(&format!("Bearer {}", admin))))
        .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(body["code"], 1010);
    assert_eq!(body["msg"], "product is referenced by orders");

    let (resp, _) = app
        .send(empty_request("GET", &uri, Some(&format!("Bearer {}", admin))))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);
}
