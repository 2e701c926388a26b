use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use orderdesk::{
    model::order::{BatchDeleteDto, BatchDeleteResultDto},
    server::controller::order::batch_delete_orders,
};
use orderdesk_test_utils::prelude::*;
use sea_orm::{EntityTrait, PaginatorTrait};

use crate::util::{json_body, TestContextExt};

/// Expect 200 with requested and deleted counts
#[tokio::test]
async fn deletes_selected_orders() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_order_tables()
        .with_user_tables()
        .build()
        .await?;
    test.login_as("operator").await?;
    let orders = test.order().insert_mock_orders(3).await?;

    let result = batch_delete_orders(
        State(test.into_app_state()),
        test.session.clone(),
        Json(BatchDeleteDto {
            order_ids: vec![orders[0].id.to_string(), orders[1].id.to_string()],
        }),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let dto: BatchDeleteResultDto = json_body(resp).await;
    assert_eq!(dto.requested_count, 2);
    assert_eq!(dto.deleted_count, 2);

    let remaining = entity::prelude::OrderdeskOrder::find().count(&test.db).await?;
    assert_eq!(remaining, 1);

    Ok(())
}

/// Expect 400 and nothing deleted when an ID is not an integer
#[tokio::test]
async fn rejects_invalid_id() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_order_tables()
        .with_user_tables()
        .build()
        .await?;
    test.login_as("operator").await?;
    let orders = test.order().insert_mock_orders(2).await?;

    let result = batch_delete_orders(
        State(test.into_app_state()),
        test.session.clone(),
        Json(BatchDeleteDto {
            order_ids: vec![orders[0].id.to_string(), "abc".to_string()],
        }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let remaining = entity::prelude::OrderdeskOrder::find().count(&test.db).await?;
    assert_eq!(remaining, 2);

    Ok(())
}

/// Expect 400 when no IDs are submitted
#[tokio::test]
async fn rejects_empty_selection() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_order_tables()
        .with_user_tables()
        .build()
        .await?;
    test.login_as("operator").await?;

    let result = batch_delete_orders(
        State(test.into_app_state()),
        test.session.clone(),
        Json(BatchDeleteDto { order_ids: vec![] }),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
