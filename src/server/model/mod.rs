//! Server application models and type definitions.
//!
//! This module contains the application state shared with HTTP handlers, database model
//! type aliases, and typed session data.

pub mod app;
pub mod db;
pub mod session;
