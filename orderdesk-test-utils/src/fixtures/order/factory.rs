//! Factory functions for generating order models without touching the database.

use chrono::Utc;

use crate::model::OrderModel;

/// Create an in-memory order model with standard test values.
///
/// # Arguments
/// - `id` - Surrogate key to assign
/// - `customer_name` - Customer the order belongs to
pub fn mock_order_model(id: i32, customer_name: &str) -> OrderModel {
    let now = Utc::now().naive_utc();
    OrderModel {
        id,
        order_id: format!("NMCF{:04}", id),
        supplier_name: "Mock Supplier".to_string(),
        customer_name: customer_name.to_string(),
        amount: 100.0,
        issue_time: now,
        phone: "13800138000".to_string(),
        coupon_code: format!("CX{:07}", id),
        validity_months: 12,
        status: "active".to_string(),
        upload_timestamp: now,
    }
}
