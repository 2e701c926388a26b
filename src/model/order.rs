use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Lifecycle state of an order. Orders are created active and no transitions exist yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Active,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Active => "active",
        }
    }
}

/// An order as presented to staff.
///
/// Phone and coupon code are accompanied by masked variants for display; the coupon code
/// itself is only ever exposed masked.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OrderDto {
    pub id: i32,
    pub order_id: String,
    pub supplier_name: String,
    pub customer_name: String,
    pub amount: f64,
    pub issue_time: NaiveDateTime,
    pub phone: String,
    pub masked_phone: String,
    pub masked_coupon_code: String,
    pub validity_months: i32,
    pub status: String,
    pub upload_timestamp: NaiveDateTime,
}

/// One page of search results plus the presentation hints derived from the search.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OrderPageDto {
    pub orders: Vec<OrderDto>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
    pub start_record: u64,
    pub end_record: u64,
    /// Human readable summary, e.g. "Showing records 1 to 10 of 23"
    pub display_info: String,
    /// Set whenever a supplier search is active
    pub hide_supplier_column: bool,
    pub searched_supplier_name: Option<String>,
    pub supplier_query: String,
    pub customer_query: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderSearchParams {
    /// 1-based page number, defaults to 1
    pub page: Option<u64>,
    /// Case-insensitive substring of the supplier name
    pub supplier_query: Option<String>,
    /// One or more customer names separated by commas, semicolons, or whitespace
    pub customer_query: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateOrderDto {
    pub supplier_name: Option<String>,
    pub customer_name: String,
    pub amount: f64,
    pub phone: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BatchDeleteDto {
    /// Surrogate keys of the orders to delete, as submitted by the form
    pub order_ids: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BatchDeleteResultDto {
    pub requested_count: usize,
    pub deleted_count: u64,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct IngestResultDto {
    pub processed_count: usize,
    pub skipped_count: usize,
    /// Per-row warnings in source order
    pub warnings: Vec<String>,
    pub message: String,
}
