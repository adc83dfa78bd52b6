/**
 * Authentication API Integration Tests
 *
 * End-to-end tests of the register/login/me endpoints and the access
 * guard, run over the full router with an in-memory database.
 */

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::json;

use mealbook::backend::auth::tokens::TokenCodec;
use mealbook::backend::routes::create_router;
use mealbook::backend::server::config::{init_schema, memory_pool};
use mealbook::backend::server::state::AppState;
use mealbook::shared::{AuthResponse, ErrorBody, UserSummary, AUTH_REQUIRED_MESSAGE};

async fn test_server() -> TestServer {
    let pool = memory_pool().await;
    init_schema(&pool).await.expect("schema init");
    let state = AppState::new(pool, TokenCodec::new("integration-test-secret", 3600));
    TestServer::new(create_router(state)).unwrap()
}

fn register_body(username: &str, email: &str) -> serde_json::Value {
    json!({
        "username": username,
        "email": email,
        "password": "correct horse battery",
    })
}

#[tokio::test]
async fn test_register_returns_token_and_user() {
    let server = test_server().await;

    let response = server
        .post("/api/auth/register")
        .json(&register_body("alice", "alice@example.com"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let auth: AuthResponse = response.json();
    assert!(!auth.token.is_empty());
    assert!(auth.expires_at > chrono::Utc::now().timestamp());
    assert_eq!(auth.user.username, "alice");
    assert_eq!(auth.user.email, "alice@example.com");
}

#[tokio::test]
async fn test_registered_token_opens_protected_routes() {
    let server = test_server().await;

    let auth: AuthResponse = server
        .post("/api/auth/register")
        .json(&register_body("alice", "alice@example.com"))
        .await
        .json();

    let response = server
        .get("/api/auth/me")
        .authorization_bearer(&auth.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let me: UserSummary = response.json();
    assert_eq!(me, auth.user);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let server = test_server().await;

    server
        .post("/api/auth/register")
        .json(&register_body("alice", "alice@example.com"))
        .await;

    // Same email, different case and username.
    let response = server
        .post("/api/auth/register")
        .json(&register_body("alice2", "Alice@Example.com"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let server = test_server().await;

    server
        .post("/api/auth/register")
        .json(&register_body("alice", "alice@example.com"))
        .await;

    let response = server
        .post("/api/auth/register")
        .json(&register_body("alice", "other@example.com"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_validation_rejects_bad_input() {
    let server = test_server().await;

    let cases = [
        json!({"username": "ab", "email": "a@example.com", "password": "long enough pw"}),
        json!({"username": "alice", "email": "not-an-email", "password": "long enough pw"}),
        json!({"username": "alice", "email": "a@example.com", "password": "short"}),
    ];

    for body in cases {
        let response = server.post("/api/auth/register").json(&body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_login_round_trip() {
    let server = test_server().await;

    server
        .post("/api/auth/register")
        .json(&register_body("alice", "alice@example.com"))
        .await;

    // Email lookup is case-insensitive.
    let response = server
        .post("/api/auth/login")
        .json(&json!({"email": "ALICE@example.com", "password": "correct horse battery"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let auth: AuthResponse = response.json();
    assert_eq!(auth.user.username, "alice");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let server = test_server().await;

    server
        .post("/api/auth/register")
        .json(&register_body("alice", "alice@example.com"))
        .await;

    let unknown_user = server
        .post("/api/auth/login")
        .json(&json!({"email": "nobody@example.com", "password": "correct horse battery"}))
        .await;
    let wrong_password = server
        .post("/api/auth/login")
        .json(&json!({"email": "alice@example.com", "password": "wrong password here"}))
        .await;

    assert_eq!(unknown_user.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.text(), wrong_password.text());
}

#[tokio::test]
async fn test_unauthenticated_access_is_rejected_generically() {
    let server = test_server().await;

    let missing = server.get("/api/saved-recipes").await;
    let garbage = server
        .get("/api/saved-recipes")
        .authorization_bearer("not.a.token")
        .await;

    assert_eq!(missing.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.status_code(), StatusCode::UNAUTHORIZED);

    let body: ErrorBody = missing.json();
    assert_eq!(body.message, AUTH_REQUIRED_MESSAGE);
    assert_eq!(missing.text(), garbage.text());
}

#[tokio::test]
async fn test_expired_and_tampered_tokens_look_identical() {
    let pool = memory_pool().await;
    init_schema(&pool).await.expect("schema init");
    let codec = TokenCodec::new("integration-test-secret", 3600);
    let state = AppState::new(pool, codec.clone());
    let server = TestServer::new(create_router(state)).unwrap();

    let user_id = uuid::Uuid::new_v4();
    let expired = codec
        .issue_with_ttl(user_id, "alice@example.com", -1)
        .unwrap();

    let valid = codec.issue(user_id, "alice@example.com").unwrap();
    let mut parts: Vec<String> = valid.token.split('.').map(String::from).collect();
    let sig = parts[2].clone();
    let flipped = if sig.starts_with('A') { "B" } else { "A" };
    parts[2] = format!("{}{}", flipped, &sig[1..]);
    let tampered = parts.join(".");

    let expired_response = server
        .get("/api/saved-recipes")
        .authorization_bearer(&expired.token)
        .await;
    let tampered_response = server
        .get("/api/saved-recipes")
        .authorization_bearer(&tampered)
        .await;

    assert_eq!(expired_response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(tampered_response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(expired_response.text(), tampered_response.text());
}
