//! Database model type aliases for test utilities.
//!
//! These aliases match those in the main orderdesk crate to keep test signatures short.

/// Type alias for the order database model.
pub type OrderModel = entity::orderdesk_order::Model;

/// Type alias for the operator account database model.
pub type UserModel = entity::orderdesk_user::Model;
