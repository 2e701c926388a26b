//! HTTP controller endpoints for the Orderdesk web API.
//!
//! This module contains Axum handlers for authentication, profile management, and orders.
//! Controllers extract request data, resolve the logged in user from the session, call into
//! services, and return JSON responses. They integrate with tower-sessions for session
//! management and use utoipa for OpenAPI documentation.

pub mod auth;
pub mod order;
pub mod user;
pub mod util;
