use axum::{extract::State, http::StatusCode, response::IntoResponse};
use orderdesk::{model::user::UserDto, server::controller::auth::get_user};
use orderdesk_test_utils::prelude::*;

use crate::util::{json_body, TestContextExt};

/// Expect 200 with the logged in user
#[tokio::test]
async fn returns_logged_in_user() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::OrderdeskUser)?;
    let user = test.login_as("operator").await?;

    let result = get_user(State(test.into_app_state()), test.session.clone()).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let dto: UserDto = json_body(resp).await;
    assert_eq!(dto.id, user.id);
    assert_eq!(dto.username, "operator");

    Ok(())
}

/// Expect 401 when nobody is logged in
#[tokio::test]
async fn unauthorized_without_session() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::OrderdeskUser)?;

    let result = get_user(State(test.into_app_state()), test.session.clone()).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
