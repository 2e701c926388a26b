//! Test fixture modules for database records and uploaded files.
//!
//! - `order` - Order records with deterministic identifiers
//! - `sheet` - In-memory CSV and XLSX uploads
//! - `user` - Operator accounts with hashed passwords

pub mod order;
pub mod sheet;
pub mod user;
