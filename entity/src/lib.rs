//! SeaORM entities for the orderdesk database schema.

pub mod prelude;

pub mod orderdesk_order;
pub mod orderdesk_user;
