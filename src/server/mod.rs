//! Server application core modules.
//!
//! This module contains all server-side functionality for the Orderdesk application,
//! including HTTP routing, authentication, database access, spreadsheet ingestion, and order
//! search. It provides the backend that staff use to upload, browse, edit, and delete
//! customer orders.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
