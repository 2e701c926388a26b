//! Orderdesk: internal order and coupon management.
//!
//! Staff upload spreadsheets of customer orders, which are validated row by row, assigned
//! unique order and coupon identifiers, and committed as one batch. Stored orders can be
//! searched, paginated, edited, and bulk-deleted through a JSON API.

pub mod model;
pub mod server;
