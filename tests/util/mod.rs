//! Shared helpers for integration tests.

use axum::{
    body::Body,
    extract::{FromRequest, Multipart},
    http::{header::CONTENT_TYPE, Request},
};
use orderdesk::server::model::{
    app::AppState,
    db::UserModel,
    session::user::{StoredOperatorId, SESSION_OPERATOR_KEY},
};
use orderdesk_test_utils::{constant::TEST_PASSWORD, TestContext, TestError};

const BOUNDARY: &str = "orderdesk-test-boundary";

/// Extension trait for TestContext to create AppState and log in operators
#[allow(async_fn_in_trait)]
pub trait TestContextExt {
    fn into_app_state(&self) -> AppState;

    /// Insert an operator with the fixture password and store their ID in the test session
    async fn login_as(&mut self, username: &str) -> Result<UserModel, TestError>;
}

impl TestContextExt for TestContext {
    fn into_app_state(&self) -> AppState {
        self.to_app_state()
    }

    async fn login_as(&mut self, username: &str) -> Result<UserModel, TestError> {
        let user = self.user().insert_user(username, TEST_PASSWORD).await?;
        self.session
            .insert(SESSION_OPERATOR_KEY, StoredOperatorId(user.id.to_string()))
            .await?;

        Ok(user)
    }
}

/// Build a `Multipart` extractor carrying one file field
pub async fn multipart_upload(field: &str, filename: &str, bytes: &[u8]) -> Multipart {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri("/api/orders/upload")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();

    Multipart::from_request(request, &()).await.unwrap()
}

/// Read a JSON response body
pub async fn json_body<T: serde::de::DeserializeOwned>(resp: axum::response::Response) -> T {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();

    serde_json::from_slice(&bytes).unwrap()
}
