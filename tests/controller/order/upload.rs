use axum::{extract::State, http::StatusCode, response::IntoResponse};
use orderdesk::{model::order::IngestResultDto, server::controller::order::upload_orders};
use orderdesk_test_utils::prelude::*;
use sea_orm::{EntityTrait, PaginatorTrait};

use crate::util::{json_body, multipart_upload, TestContextExt};

fn two_row_sheet() -> SheetFixture {
    SheetFixture::standard()
        .valid_row("ACME", "Li Lei", "120.5", "13812345678")
        .valid_row("", "Wang Fang", "88", "13900001111")
}

/// Expect 200 with counts when uploading a valid CSV file
#[tokio::test]
async fn ingests_csv_upload() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_order_tables()
        .with_user_tables()
        .build()
        .await?;
    test.login_as("operator").await?;

    let multipart = multipart_upload("file", "orders.csv", &two_row_sheet().to_csv()?).await;
    let result = upload_orders(State(test.into_app_state()), test.session.clone(), multipart).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let dto: IngestResultDto = json_body(resp).await;
    assert_eq!(dto.processed_count, 2);
    assert_eq!(dto.skipped_count, 0);
    assert_eq!(dto.message, "File processed. Added 2 records, skipped 0 records.");

    let stored = entity::prelude::OrderdeskOrder::find().count(&test.db).await?;
    assert_eq!(stored, 2);

    Ok(())
}

/// Expect 200 when uploading the same rows as an XLSX workbook
#[tokio::test]
async fn ingests_xlsx_upload() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_order_tables()
        .with_user_tables()
        .build()
        .await?;
    test.login_as("operator").await?;

    let multipart = multipart_upload("file", "orders.xlsx", &two_row_sheet().to_xlsx()?).await;
    let result = upload_orders(State(test.into_app_state()), test.session.clone(), multipart).await;

    assert!(result.is_ok());
    let dto: IngestResultDto = json_body(result.unwrap().into_response()).await;
    assert_eq!(dto.processed_count, 2);

    Ok(())
}

/// Expect 400 when the form carries no file field
#[tokio::test]
async fn rejects_missing_file() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_order_tables()
        .with_user_tables()
        .build()
        .await?;
    test.login_as("operator").await?;

    let multipart = multipart_upload("attachment", "orders.csv", &two_row_sheet().to_csv()?).await;
    let result = upload_orders(State(test.into_app_state()), test.session.clone(), multipart).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 400 for a file extension that is not a spreadsheet
#[tokio::test]
async fn rejects_unsupported_file_type() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_order_tables()
        .with_user_tables()
        .build()
        .await?;
    test.login_as("operator").await?;

    let multipart = multipart_upload("file", "orders.txt", b"not a spreadsheet").await;
    let result = upload_orders(State(test.into_app_state()), test.session.clone(), multipart).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 400 and nothing persisted when a required column is missing
#[tokio::test]
async fn rejects_missing_columns() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_order_tables()
        .with_user_tables()
        .build()
        .await?;
    test.login_as("operator").await?;

    let sheet = SheetFixture::new(["客户名称", "电话"]).row(["Li Lei", "13812345678"]);
    let multipart = multipart_upload("file", "orders.csv", &sheet.to_csv()?).await;
    let result = upload_orders(State(test.into_app_state()), test.session.clone(), multipart).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let stored = entity::prelude::OrderdeskOrder::find().count(&test.db).await?;
    assert_eq!(stored, 0);

    Ok(())
}

/// Expect 413 when the file exceeds the configured upload limit
#[tokio::test]
async fn rejects_oversized_file() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_order_tables()
        .with_user_tables()
        .build()
        .await?;
    test.login_as("operator").await?;

    let mut state = test.into_app_state();
    state.max_upload_bytes = 16;

    let multipart = multipart_upload("file", "orders.csv", &two_row_sheet().to_csv()?).await;
    let result = upload_orders(State(state), test.session.clone(), multipart).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

    Ok(())
}

/// Expect 401 when nobody is logged in
#[tokio::test]
async fn unauthorized_without_session() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_order_tables()
        .with_user_tables()
        .build()
        .await?;

    let multipart = multipart_upload("file", "orders.csv", &two_row_sheet().to_csv()?).await;
    let result = upload_orders(State(test.into_app_state()), test.session.clone(), multipart).await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
