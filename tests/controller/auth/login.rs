use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use orderdesk::{
    model::user::LoginDto,
    server::{controller::auth::login, model::session::user::SessionOperator},
};
use orderdesk_test_utils::{constant::TEST_PASSWORD, prelude::*};

use crate::util::TestContextExt;

/// Expect 200 and the user ID stored in session for valid credentials
#[tokio::test]
async fn logs_in_with_valid_credentials() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::OrderdeskUser)?;
    let user = test.user().insert_user("operator", TEST_PASSWORD).await?;

    let result = login(
        State(test.into_app_state()),
        test.session.clone(),
        Json(LoginDto {
            username: "operator".to_string(),
            password: TEST_PASSWORD.to_string(),
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let session_user_id = SessionOperator::current(&test.session).await.unwrap();
    assert_eq!(session_user_id, Some(user.id));

    Ok(())
}

/// Expect 401 and no session entry for a wrong password
#[tokio::test]
async fn rejects_wrong_password() -> Result<(), TestError> {
    let mut test = test_setup_with_tables!(entity::prelude::OrderdeskUser)?;
    test.user().insert_user("operator", TEST_PASSWORD).await?;

    let result = login(
        State(test.into_app_state()),
        test.session.clone(),
        Json(LoginDto {
            username: "operator".to_string(),
            password: "not-the-password".to_string(),
        }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let session_user_id = SessionOperator::current(&test.session).await.unwrap();
    assert!(session_user_id.is_none());

    Ok(())
}

/// Expect 401 for a username that does not exist
#[tokio::test]
async fn rejects_unknown_username() -> Result<(), TestError> {
    let test = test_setup_with_tables!(entity::prelude::OrderdeskUser)?;

    let result = login(
        State(test.into_app_state()),
        test.session.clone(),
        Json(LoginDto {
            username: "nobody".to_string(),
            password: TEST_PASSWORD.to_string(),
        }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect 500 when the user table does not exist
#[tokio::test]
async fn fails_when_tables_missing() -> Result<(), TestError> {
    let test = test_setup_with_tables!()?;

    let result = login(
        State(test.into_app_state()),
        test.session.clone(),
        Json(LoginDto {
            username: "operator".to_string(),
            password: TEST_PASSWORD.to_string(),
        }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    Ok(())
}
