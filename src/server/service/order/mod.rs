//! Order service layer.
//!
//! This module contains the business logic for listing, viewing, editing, and bulk-deleting
//! orders, as well as spreadsheet ingestion. Read operations run under a retry context so
//! transient connection failures do not surface to staff.

pub mod identifier;
pub mod ingest;
pub mod pagination;
pub mod search;

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::{
    model::order::{
        BatchDeleteResultDto, OrderDto, OrderPageDto, OrderSearchParams, UpdateOrderDto,
    },
    server::{
        data::order::{OrderChanges, OrderRepository},
        error::{order::OrderError, Error},
        model::db::OrderModel,
        service::{
            order::{
                pagination::{normalize_page, paginate_orders},
                search::OrderSearch,
            },
            retry::RetryContext,
        },
        util::mask::{mask_coupon_code, mask_phone},
    },
};

pub const CUSTOMER_NAME_MAX_LEN: usize = 64;
pub const SUPPLIER_NAME_MAX_LEN: usize = 128;
pub const PHONE_MIN_LEN: usize = 5;
pub const PHONE_MAX_LEN: usize = 20;

impl From<OrderModel> for OrderDto {
    fn from(order: OrderModel) -> Self {
        Self {
            masked_phone: mask_phone(&order.phone),
            masked_coupon_code: mask_coupon_code(&order.coupon_code),
            id: order.id,
            order_id: order.order_id,
            supplier_name: order.supplier_name,
            customer_name: order.customer_name,
            amount: order.amount,
            issue_time: order.issue_time,
            phone: order.phone,
            validity_months: order.validity_months,
            status: order.status,
            upload_timestamp: order.upload_timestamp,
        }
    }
}

/// Service for querying and modifying stored orders.
pub struct OrderService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OrderService<'a> {
    /// Creates a new instance of [`OrderService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Searches orders and returns the requested page, newest upload first.
    ///
    /// # Arguments
    /// - `params` - Optional page, supplier query, and customer query
    /// - `per_page` - Number of orders per page
    ///
    /// # Returns
    /// - `Ok(OrderPageDto)` - The page with display metadata and echoed queries
    /// - `Err(Error::DbErr)` - Database operation failed after retries
    pub async fn search(
        &self,
        params: &OrderSearchParams,
        per_page: u64,
    ) -> Result<OrderPageDto, Error> {
        let search = OrderSearch::new(
            params.supplier_query.as_deref(),
            params.customer_query.as_deref(),
        );
        let page = normalize_page(params.page);

        let ctx = RetryContext::new();
        let page = ctx
            .execute_with_retry(&format!("order search page {}", page), || async {
                Ok(paginate_orders(self.db, search.condition(), page, per_page).await?)
            })
            .await?;

        let total_pages = page.total_pages();
        let display_info = page.display_info();
        let page = page.map(OrderDto::from);

        Ok(OrderPageDto {
            orders: page.items,
            page: page.page,
            per_page: page.per_page,
            total: page.total,
            total_pages,
            start_record: page.start_record,
            end_record: page.end_record,
            display_info,
            hide_supplier_column: search.hide_supplier_column(),
            searched_supplier_name: search.searched_supplier_name().map(str::to_string),
            supplier_query: params.supplier_query.clone().unwrap_or_default(),
            customer_query: params.customer_query.clone().unwrap_or_default(),
        })
    }

    /// Retrieves a single order
    ///
    /// # Returns
    /// - `Ok(OrderDto)` - The order with masked fields
    /// - `Err(Error::OrderError(OrderError::NotFound))` - No order with `id`
    /// - `Err(Error::DbErr)` - Database operation failed after retries
    pub async fn get_order(&self, id: i32) -> Result<OrderDto, Error> {
        let ctx = RetryContext::new();

        let order = ctx
            .execute_with_retry(&format!("get order ID {}", id), || async {
                Ok(OrderRepository::new(self.db).get_by_id(id).await?)
            })
            .await?;

        order
            .map(OrderDto::from)
            .ok_or_else(|| OrderError::NotFound(id).into())
    }

    /// Validates and applies an edit to an order
    ///
    /// Identifiers, issue time, validity, and status are never changed.
    ///
    /// # Returns
    /// - `Ok(OrderDto)` - The updated order
    /// - `Err(Error::OrderError(OrderError::Validation))` - Edit rejected, nothing persisted
    /// - `Err(Error::OrderError(OrderError::NotFound))` - No order with `id`
    pub async fn update_order(&self, id: i32, dto: UpdateOrderDto) -> Result<OrderDto, Error> {
        let changes = validate_changes(dto)?;

        let order = OrderRepository::new(self.db)
            .update(id, changes)
            .await?
            .ok_or(OrderError::NotFound(id))?;

        tracing::info!("Order {} (ID {}) updated", order.order_id, order.id);

        Ok(order.into())
    }

    /// Deletes every order whose ID is listed
    ///
    /// All IDs are parsed before anything is deleted. IDs that match no order are ignored, so
    /// the deleted count may be lower than the number requested.
    ///
    /// # Returns
    /// - `Ok(BatchDeleteResultDto)` - Requested and deleted counts
    /// - `Err(Error::OrderError(OrderError::NothingSelected))` - `ids` is empty
    /// - `Err(Error::OrderError(OrderError::InvalidIdFormat))` - An ID is not an integer
    pub async fn batch_delete(&self, ids: &[String]) -> Result<BatchDeleteResultDto, Error> {
        let ids = parse_order_ids(ids)?;

        let result = OrderRepository::new(self.db).delete_many(&ids).await?;

        tracing::info!(
            "Batch delete removed {} of {} requested orders",
            result.rows_affected,
            ids.len()
        );

        Ok(BatchDeleteResultDto {
            requested_count: ids.len(),
            deleted_count: result.rows_affected,
            message: format!(
                "Successfully deleted {} of {} selected records.",
                result.rows_affected,
                ids.len()
            ),
        })
    }
}

/// Checks an edit and produces the trimmed values to persist.
pub fn validate_changes(dto: UpdateOrderDto) -> Result<OrderChanges, OrderError> {
    if !dto.amount.is_finite() || dto.amount < 0.0 {
        return Err(OrderError::Validation(
            "Amount must be a number greater than or equal to 0.".to_string(),
        ));
    }

    let customer_name = dto.customer_name.trim().to_string();
    if customer_name.is_empty() || customer_name.chars().count() > CUSTOMER_NAME_MAX_LEN {
        return Err(OrderError::Validation(format!(
            "Customer name is required and must be at most {} characters.",
            CUSTOMER_NAME_MAX_LEN
        )));
    }

    let phone = dto.phone.trim().to_string();
    let phone_len = phone.chars().count();
    if !(PHONE_MIN_LEN..=PHONE_MAX_LEN).contains(&phone_len) {
        return Err(OrderError::Validation(format!(
            "Phone must be between {} and {} characters.",
            PHONE_MIN_LEN, PHONE_MAX_LEN
        )));
    }

    let supplier_name = dto
        .supplier_name
        .map(|name| name.trim().to_string())
        .unwrap_or_default();
    if supplier_name.chars().count() > SUPPLIER_NAME_MAX_LEN {
        return Err(OrderError::Validation(format!(
            "Supplier name must be at most {} characters.",
            SUPPLIER_NAME_MAX_LEN
        )));
    }

    Ok(OrderChanges {
        supplier_name,
        customer_name,
        amount: dto.amount,
        phone,
    })
}

/// Parses submitted order IDs, failing on the first value that is not an integer.
pub fn parse_order_ids(ids: &[String]) -> Result<Vec<i32>, OrderError> {
    if ids.is_empty() {
        return Err(OrderError::NothingSelected);
    }

    ids.iter()
        .map(|id| {
            id.trim()
                .parse::<i32>()
                .map_err(|_| OrderError::InvalidIdFormat(id.clone()))
        })
        .collect()
}
