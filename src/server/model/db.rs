//! Database model type aliases.
//!
//! This module provides convenient type aliases for SeaORM database entity models used
//! throughout the application, so signatures don't need to reach into the generated
//! `entity` crate directly.

/// Type alias for the order database model.
///
/// # Fields (from `entity::orderdesk_order::Model`)
/// - `id` - Primary key, surrogate identifier
/// - `order_id` - Externally visible `NMCF` identifier (unique)
/// - `supplier_name` - Supplier, empty when unknown
/// - `customer_name` - Customer the coupon was issued to
/// - `amount` - Non-negative order amount
/// - `issue_time` - When the coupon was issued
/// - `phone` - Customer phone number
/// - `coupon_code` - Redeemable `CX` code (unique)
/// - `validity_months` - Coupon validity, 12 on creation
/// - `status` - Lifecycle state, `active` on creation
/// - `upload_timestamp` - When the record was ingested
pub type OrderModel = entity::orderdesk_order::Model;

/// Type alias for the operator account database model.
///
/// # Fields (from `entity::orderdesk_user::Model`)
/// - `id` - Primary key
/// - `username` - Unique login name
/// - `password_hash` - Argon2 PHC string
/// - `avatar` - Avatar image filename
/// - `created_at` - Account creation time
pub type UserModel = entity::orderdesk_user::Model;
