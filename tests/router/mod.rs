use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use orderdesk::server::{config::DEFAULT_MAX_UPLOAD_BYTES, router::routes};
use orderdesk_test_utils::{constant::TEST_PASSWORD, prelude::*};
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::util::TestContextExt;

fn app(test: &TestContext) -> Router {
    routes(DEFAULT_MAX_UPLOAD_BYTES)
        .with_state(test.into_app_state())
        .layer(SessionManagerLayer::new(MemoryStore::default()))
}

/// Expect 401 from an order route when the request carries no session cookie
#[tokio::test]
async fn order_routes_require_login() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .with_user_tables()
        .build()
        .await?;

    let resp = app(&test)
        .oneshot(
            Request::builder()
                .uri("/api/orders?page=2&supplier_query=ACME")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect login through the router to answer 200 and set a session cookie
#[tokio::test]
async fn login_sets_session_cookie() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_user("operator", TEST_PASSWORD)
        .build()
        .await?;

    let body = serde_json::json!({ "username": "operator", "password": TEST_PASSWORD });
    let resp = app(&test)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(header::SET_COOKIE));

    Ok(())
}

/// Expect the OpenAPI document to list the upload endpoint
#[tokio::test]
async fn serves_openapi_document() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let resp = app(&test)
        .oneshot(
            Request::builder()
                .uri("/api/docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(doc["paths"]["/api/orders/upload"].is_object());

    Ok(())
}
