//! API Tests for the contact endpoints
//!
//! Drive the router in-process with `tower::ServiceExt::oneshot`.

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, Method, Request, StatusCode},
    Router,
};
use contactbox_core::{build_router, AppState, Config, ContactStore};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;

const PASSWORD: &str = "correct-horse";

// =============================================================================
// Test Helpers
// =============================================================================

fn test_config() -> Config {
    let mut config = Config::default();
    config.admin.password = PASSWORD.to_string();
    config
}

fn initialized_store() -> ContactStore {
    let store = ContactStore::memory().expect("Failed to create store");
    store.initialize().expect("Failed to initialize store");
    store
}

fn app_with(store: ContactStore, config: &Config) -> Router {
    build_router(Arc::new(AppState::new(store, config)))
}

fn test_app() -> Router {
    app_with(initialized_store(), &test_config())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("Request failed");
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn submit_request(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn list_request(password: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/api/contacts?password={}", password))
        .body(Body::empty())
        .unwrap()
}

fn delete_request(id: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(format!("/api/contacts/{}?password={}", id, password))
        .body(Body::empty())
        .unwrap()
}

fn ann() -> Value {
    json!({"name": "Ann", "email": "a@b.com", "subject": "Hi", "message": "Hello"})
}

// =============================================================================
// Health & Index
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "contact-form-api");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_does_not_need_store() {
    // Store never initialized; health must still answer
    let app = app_with(ContactStore::memory().unwrap(), &test_config());
    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_index_page() {
    let app = test_app();
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("/api/contact"));
}

#[tokio::test]
async fn test_unknown_route() {
    let app = test_app();
    let (status, body) = send(
        &app,
        Request::builder().uri("/nope").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

// =============================================================================
// Submission
// =============================================================================

#[tokio::test]
async fn test_submit_on_fresh_store() {
    let app = test_app();

    let (status, body) = send(&app, submit_request(ann())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["name"], "Ann");
    assert_eq!(body["data"]["email"], "a@b.com");
    assert_eq!(body["data"]["subject"], "Hi");
    assert!(body["message"].as_str().unwrap().starts_with("Thank you"));
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_submit_ids_increase() {
    let app = test_app();

    let mut last = 0;
    for _ in 0..3 {
        let (status, body) = send(&app, submit_request(ann())).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["data"]["id"].as_i64().unwrap();
        assert!(id > last);
        last = id;
    }
}

#[tokio::test]
async fn test_submit_blank_name() {
    let app = test_app();

    let (status, body) = send(
        &app,
        submit_request(json!({"name": "", "email": "a@b.com", "subject": "Hi", "message": "Hello"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");
    assert_eq!(body["missing"], json!(["name"]));
}

#[tokio::test]
async fn test_submit_reports_every_missing_field() {
    let app = test_app();

    let (status, body) = send(
        &app,
        submit_request(json!({"email": "a@b.com", "subject": "   ", "other": 1})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["missing"], json!(["name", "subject", "message"]));
}

#[tokio::test]
async fn test_submit_invalid_email() {
    let app = test_app();

    for email in ["ann.example.com", "ann@example", "   "] {
        let mut body = ann();
        body["email"] = json!(email);
        let (status, response) = send(&app, submit_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            response["error"] == "Invalid email" || response["missing"] == json!(["email"]),
            "unexpected response for {:?}: {}",
            email,
            response
        );
    }
}

#[tokio::test]
async fn test_submit_without_body() {
    let app = test_app();

    let no_body = Request::builder()
        .method(Method::POST)
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, no_body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No data provided");

    let garbage = Request::builder()
        .method(Method::POST)
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, garbage).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No data provided");

    let (status, body) = send(&app, submit_request(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No data provided");
}

#[tokio::test]
async fn test_rejected_submissions_are_not_stored() {
    let store = initialized_store();
    let app = app_with(store.clone(), &test_config());

    send(&app, submit_request(json!({"name": "Ann"}))).await;
    send(&app, submit_request(json!({"name": "Ann", "email": "bad", "subject": "s", "message": "m"}))).await;

    assert!(store.list_all().unwrap().is_empty());
}

#[tokio::test]
async fn test_submit_stores_trimmed_values_and_peer_address() {
    let store = initialized_store();
    let app = app_with(store.clone(), &test_config());

    let mut request = submit_request(
        json!({"name": "  Ann ", "email": " a@b.com", "subject": "Hi ", "message": " Hello "}),
    );
    let peer: SocketAddr = "203.0.113.7:55000".parse().unwrap();
    request.extensions_mut().insert(ConnectInfo(peer));

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "Ann");
    assert_eq!(body["data"]["email"], "a@b.com");
    assert_eq!(body["data"]["subject"], "Hi");

    let stored = store.list_all().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "Ann");
    assert_eq!(stored[0].email, "a@b.com");
    assert_eq!(stored[0].message, "Hello");
    assert_eq!(stored[0].ip_address.as_deref(), Some("203.0.113.7"));
}

#[tokio::test]
async fn test_submit_store_failure_is_generic() {
    // Uninitialized store: every insert fails
    let app = app_with(ContactStore::memory().unwrap(), &test_config());

    let (status, body) = send(&app, submit_request(ann())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert!(!body.to_string().contains("no such table"));
}

// =============================================================================
// Admin: list
// =============================================================================

#[tokio::test]
async fn test_list_wrong_password() {
    let app = test_app();
    send(&app, submit_request(ann())).await;

    for password in ["", "wrong", "correct-hors", "correct-horse2"] {
        let (status, body) = send(&app, list_request(password)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Unauthorized");
        assert!(body.get("contacts").is_none());
        assert!(!body.to_string().contains("Ann"));
    }
}

#[tokio::test]
async fn test_list_without_password_param() {
    let app = test_app();
    let request = Request::builder()
        .uri("/api/contacts")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_repeated_password_uses_first() {
    let app = test_app();
    send(&app, submit_request(ann())).await;

    let (status, body) = send(&app, list_request(&format!("x&password={}", PASSWORD))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(body["message"], "Invalid password");

    let (status, body) = send(&app, list_request(&format!("{}&password=x", PASSWORD))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn test_list_newest_first() {
    let app = test_app();

    for name in ["First", "Second", "Third"] {
        let mut body = ann();
        body["name"] = json!(name);
        send(&app, submit_request(body)).await;
    }

    let (status, body) = send(&app, list_request(PASSWORD)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 3);

    let names: Vec<&str> = body["contacts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Third", "Second", "First"]);

    let first = &body["contacts"][0];
    for key in ["id", "name", "email", "subject", "message", "timestamp", "ip_address"] {
        assert!(first.get(key).is_some(), "missing key {}", key);
    }
}

#[tokio::test]
async fn test_list_failure_exposes_detail_when_enabled() {
    let app = app_with(ContactStore::memory().unwrap(), &test_config());

    let (status, body) = send(&app, list_request(PASSWORD)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to fetch contacts");
    assert!(body["error"].as_str().unwrap().contains("no such table"));
}

#[tokio::test]
async fn test_list_failure_redacted_when_disabled() {
    let mut config = test_config();
    config.admin.expose_internal_errors = false;
    let app = app_with(ContactStore::memory().unwrap(), &config);

    let (status, body) = send(&app, list_request(PASSWORD)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}

// =============================================================================
// Admin: delete
// =============================================================================

#[tokio::test]
async fn test_delete_nonexistent() {
    let app = test_app();

    let (status, body) = send(&app, delete_request("999", PASSWORD)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Contact 999 not found");
}

#[tokio::test]
async fn test_delete_non_numeric_id() {
    let app = test_app();

    let (status, _) = send(&app, delete_request("abc", PASSWORD)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_wrong_password_keeps_record() {
    let store = initialized_store();
    let app = app_with(store.clone(), &test_config());
    send(&app, submit_request(ann())).await;

    let (status, _) = send(&app, delete_request("1", "guess")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(store.list_all().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_removes_exactly_one() {
    let app = test_app();
    send(&app, submit_request(ann())).await;
    send(&app, submit_request(ann())).await;

    let (status, body) = send(&app, delete_request("1", PASSWORD)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Contact 1 deleted successfully");

    let (_, listing) = send(&app, list_request(PASSWORD)).await;
    assert_eq!(listing["count"], 1);
    assert_eq!(listing["contacts"][0]["id"], 2);

    // Second delete of the same id
    let (status, _) = send(&app, delete_request("1", PASSWORD)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_repeated_password_uses_first() {
    let store = initialized_store();
    let app = app_with(store.clone(), &test_config());
    send(&app, submit_request(ann())).await;

    let (status, body) =
        send(&app, delete_request("1", &format!("x&password={}", PASSWORD))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(store.list_all().unwrap().len(), 1);

    let (status, _) = send(&app, delete_request("1", &format!("{}&password=x", PASSWORD))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(store.list_all().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_failure_exposes_detail_when_enabled() {
    let app = app_with(ContactStore::memory().unwrap(), &test_config());

    let (status, body) = send(&app, delete_request("1", PASSWORD)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to delete contact");
    assert!(body["error"].as_str().unwrap().contains("no such table"));
}

#[tokio::test]
async fn test_delete_failure_redacted_when_disabled() {
    let mut config = test_config();
    config.admin.expose_internal_errors = false;
    let app = app_with(ContactStore::memory().unwrap(), &config);

    let (status, body) = send(&app, delete_request("1", PASSWORD)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert_eq!(body["message"], "Failed to delete contact");
    assert!(!body.to_string().contains("no such table"));
}

#[tokio::test]
async fn test_cors_headers() {
    let app = test_app();
    let request = Request::builder()
        .uri("/api/health")
        .header(header::ORIGIN, "https://portfolio.example")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
