//! Data transfer objects shared between the API and its consumers.

pub mod api;
pub mod order;
pub mod user;
