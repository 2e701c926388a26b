use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use orderdesk::{
    model::user::{RegisterDto, UserDto},
    server::controller::auth::register,
};
use orderdesk_test_utils::prelude::*;

use crate::util::{json_body, TestContextExt};

fn register_dto(username: &str, password: &str, confirm_password: &str) -> RegisterDto {
    RegisterDto {
        username: username.to_string(),
        password: password.to_string(),
        confirm_password: confirm_password.to_string(),
    }
}

/// Expect 201 with the created user and the default avatar
#[tokio::test]
async fn registers_new_user() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::OrderdeskUser)?;

    let result = register(
        State(test.into_app_state()),
        Json(register_dto("operator", "secret1", "secret1")),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let user: UserDto = json_body(resp).await;
    assert_eq!(user.username, "operator");
    assert_eq!(user.avatar, "default_avatar.png");

    Ok(())
}

/// Expect 409 when the username is already taken
#[tokio::test]
async fn rejects_duplicate_username() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::OrderdeskUser)?;
    test.user().insert_user("operator", "secret1").await?;

    let result = register(
        State(test.into_app_state()),
        Json(register_dto("operator", "secret2", "secret2")),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    Ok(())
}

/// Expect 400 when the confirmation does not match the password
#[tokio::test]
async fn rejects_mismatched_confirmation() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::OrderdeskUser)?;

    let result = register(
        State(test.into_app_state()),
        Json(register_dto("operator", "secret1", "secret2")),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 400 when the password is shorter than six characters
#[tokio::test]
async fn rejects_short_password() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::OrderdeskUser)?;

    let result = register(
        State(test.into_app_state()),
        Json(register_dto("operator", "abc", "abc")),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
