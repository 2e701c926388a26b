use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        order::{
            BatchDeleteDto, BatchDeleteResultDto, IngestResultDto, OrderDto, OrderPageDto,
            OrderSearchParams, UpdateOrderDto,
        },
    },
    server::{
        controller::util::get_user::get_user_from_session,
        error::{ingest::IngestError, Error},
        model::app::AppState,
        service::order::{ingest::IngestService, OrderService},
    },
};

pub static ORDER_TAG: &str = "order";

/// Multipart field holding the uploaded spreadsheet
pub const UPLOAD_FIELD: &str = "file";

/// Multipart form accepted by the upload endpoint
#[allow(dead_code)]
#[derive(utoipa::ToSchema)]
pub struct UploadOrdersForm {
    /// Spreadsheet (.xlsx, .xlsm, .xlsb, .xls, .ods) or .csv file
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// Search orders and return one page of results
///
/// # Responses
/// - 200 (Success): The requested page, newest uploads first
/// - 401 (Unauthorized): Not logged in
/// - 500 (Internal Server Error): Database or session failure
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = ORDER_TAG,
    params(OrderSearchParams),
    responses(
        (status = 200, description = "Page of matching orders", body = OrderPageDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_orders(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<OrderSearchParams>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let page = OrderService::new(&state.db)
        .search(&params, state.page_size)
        .await?;

    Ok((StatusCode::OK, Json(page)))
}

/// Get a single order
///
/// # Responses
/// - 200 (Success): The order, including masked phone and coupon code
/// - 401 (Unauthorized): Not logged in
/// - 404 (Not Found): No order with that ID
/// - 500 (Internal Server Error): Database or session failure
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order surrogate key")),
    responses(
        (status = 200, description = "The order", body = OrderDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_order(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let order = OrderService::new(&state.db).get_order(id).await?;

    Ok((StatusCode::OK, Json(order)))
}

/// Edit an order's supplier, customer, amount, and phone
///
/// # Responses
/// - 200 (Success): The updated order
/// - 400 (Bad Request): Edit failed validation, nothing changed
/// - 401 (Unauthorized): Not logged in
/// - 404 (Not Found): No order with that ID
/// - 500 (Internal Server Error): Database or session failure
#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    tag = ORDER_TAG,
    params(("id" = i32, Path, description = "Order surrogate key")),
    request_body = UpdateOrderDto,
    responses(
        (status = 200, description = "Order updated", body = OrderDto),
        (status = 400, description = "Invalid edit", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_order(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(dto): Json<UpdateOrderDto>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let order = OrderService::new(&state.db).update_order(id, dto).await?;

    Ok((StatusCode::OK, Json(order)))
}

/// Upload a spreadsheet of orders
///
/// Rows that fail validation are skipped and reported as warnings; the remaining rows are
/// saved together or not at all.
///
/// # Responses
/// - 200 (Success): File processed, returns counts and row warnings
/// - 400 (Bad Request): No file, unsupported or unreadable file, or missing required columns
/// - 401 (Unauthorized): Not logged in
/// - 413 (Payload Too Large): File exceeds the upload limit
/// - 500 (Internal Server Error): Saving the batch failed, nothing was saved
#[utoipa::path(
    post,
    path = "/api/orders/upload",
    tag = ORDER_TAG,
    request_body(content = UploadOrdersForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "File processed", body = IngestResultDto),
        (status = 400, description = "File rejected", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 413, description = "File too large", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_orders(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let max_upload_bytes = state.max_upload_bytes;
    let multipart_error = |e: MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            IngestError::FileTooLarge(max_upload_bytes)
        } else {
            IngestError::UnreadableFile(e.body_text())
        }
    };

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;
        upload = Some((filename, bytes));
        break;
    }

    let (filename, bytes) = match upload {
        Some((filename, bytes)) if !filename.is_empty() => (filename, bytes),
        _ => return Err(IngestError::MissingFile.into()),
    };

    if bytes.len() > max_upload_bytes {
        return Err(IngestError::FileTooLarge(max_upload_bytes).into());
    }

    let result = IngestService::new(&state.db)
        .ingest(&filename, bytes.to_vec())
        .await?;

    Ok((StatusCode::OK, Json(IngestResultDto::from(result))))
}

/// Delete several orders at once
///
/// IDs that match no order are ignored; the response reports how many were deleted.
///
/// # Responses
/// - 200 (Success): Returns requested and deleted counts
/// - 400 (Bad Request): Empty selection or an ID that is not an integer, nothing deleted
/// - 401 (Unauthorized): Not logged in
/// - 500 (Internal Server Error): Database or session failure
#[utoipa::path(
    post,
    path = "/api/orders/batch-delete",
    tag = ORDER_TAG,
    request_body = BatchDeleteDto,
    responses(
        (status = 200, description = "Orders deleted", body = BatchDeleteResultDto),
        (status = 400, description = "Invalid selection", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn batch_delete_orders(
    State(state): State<AppState>,
    session: Session,
    Json(dto): Json<BatchDeleteDto>,
) -> Result<impl IntoResponse, Error> {
    get_user_from_session(&state, &session).await?;

    let result = OrderService::new(&state.db)
        .batch_delete(&dto.order_ids)
        .await?;

    Ok((StatusCode::OK, Json(result)))
}
