use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use orderdesk::{model::order::OrderDto, server::controller::order::get_order};
use orderdesk_test_utils::prelude::*;

use crate::util::{json_body, TestContextExt};

/// Expect 200 with the requested order
#[tokio::test]
async fn returns_order() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_order_tables()
        .with_user_tables()
        .build()
        .await?;
    test.login_as("operator").await?;
    let order = test.order().insert_mock_order("Li Lei", "ACME").await?;

    let result = get_order(
        State(test.into_app_state()),
        test.session.clone(),
        Path(order.id),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let dto: OrderDto = json_body(resp).await;
    assert_eq!(dto.order_id, order.order_id);
    assert_eq!(dto.customer_name, "Li Lei");
    assert_eq!(dto.status, "active");

    Ok(())
}

/// Expect 404 for an order that does not exist
#[tokio::test]
async fn not_found_for_missing_order() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_order_tables()
        .with_user_tables()
        .build()
        .await?;
    test.login_as("operator").await?;

    let result = get_order(
        State(test.into_app_state()),
        test.session.clone(),
        Path(999),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
