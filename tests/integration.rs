//! Integration tests: health and auth (signup/signin).
//!
//! Run with `cargo test`. Tests that need a database set:
//! - `TEST_DATABASE_URL` (Postgres, run migrations first)
//! and are skipped when it is unset.

use authd::auth::TokenSigner;
use authd::db::{self, PgUserStore};
use authd::{create_app, AppState, AuthService};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use tower::util::ServiceExt;

const TEST_SECRET: &str = "test-jwt-secret-min-32-chars!!!!";

async fn test_state(database_url: &str) -> Result<AppState, Box<dyn std::error::Error>> {
    let db_pool = db::create_pool(database_url).await?;
    let store = Arc::new(PgUserStore::new(db_pool));
    let auth_service = AuthService::new(store, TokenSigner::new(TEST_SECRET.to_string()));
    Ok(AppState { auth_service })
}

async fn test_app() -> Option<axum::Router> {
    let database_url = match std::env::var("TEST_DATABASE_URL") {
        Ok(u) => u,
        Err(_) => {
            eprintln!("Skip integration test: set TEST_DATABASE_URL");
            return None;
        }
    };
    match test_state(&database_url).await {
        Ok(s) => Some(create_app(s)),
        Err(e) => {
            eprintln!("Skip integration test: {}", e);
            None
        }
    }
}

fn unique_email() -> String {
    format!(
        "test-{}@example.com",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    )
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(res: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_returns_ok() {
    let Some(app) = test_app().await else { return };

    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = json_body(res).await;
    assert_eq!(json.get("status").and_then(|v| v.as_str()), Some("ok"));
}

#[tokio::test]
async fn signup_then_signin() {
    let Some(app) = test_app().await else { return };
    let email = unique_email();

    let body = serde_json::json!({ "email": email, "nickname": "abc", "password": "secret1" });
    let res = app.clone().oneshot(post_json("/auth/signup", &body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED, "signup should succeed");
    let json = json_body(res).await;
    let signup_access = json.get("access_token").and_then(|v| v.as_str()).unwrap();
    assert!(!signup_access.is_empty());
    assert!(json.get("refresh_token").and_then(|v| v.as_str()).is_some());

    let res = app.clone().oneshot(post_json("/auth/signin", &body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK, "signin should succeed");
    let json = json_body(res).await;
    assert!(json.get("access_token").and_then(|v| v.as_str()).is_some());
    assert!(json.get("refresh_token").and_then(|v| v.as_str()).is_some());
}

#[tokio::test]
async fn duplicate_signup_is_forbidden() {
    let Some(app) = test_app().await else { return };
    let email = unique_email();

    let body = serde_json::json!({ "email": email, "nickname": "abc", "password": "secret1" });
    let res = app.clone().oneshot(post_json("/auth/signup", &body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app.oneshot(post_json("/auth/signup", &body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN, "second signup should be rejected");
    let json = json_body(res).await;
    assert_eq!(
        json.get("error").and_then(|v| v.as_str()),
        Some("Credentials taken")
    );
}

#[tokio::test]
async fn signin_failures_are_forbidden() {
    let Some(app) = test_app().await else { return };
    let email = unique_email();

    let body = serde_json::json!({ "email": email, "nickname": "abc", "password": "secret1" });
    let res = app.clone().oneshot(post_json("/auth/signin", &body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN, "unknown email should be denied");

    let res = app.clone().oneshot(post_json("/auth/signup", &body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let wrong = serde_json::json!({ "email": email, "nickname": "abc", "password": "wrong" });
    let res = app.oneshot(post_json("/auth/signin", &wrong)).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN, "wrong password should be rejected");
}

#[tokio::test]
async fn oversized_nickname_fails_validation() {
    let Some(app) = test_app().await else { return };

    let body = serde_json::json!({
        "email": unique_email(),
        "nickname": "x".repeat(25),
        "password": "secret1"
    });
    let res = app.oneshot(post_json("/auth/signup", &body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST, "validation should reject before the store");
}
