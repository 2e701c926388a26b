//! Data access layer repositories.
//!
//! This module contains all database repository implementations for the application.
//! Repositories provide an abstraction layer over database operations, organizing
//! data access by domain (orders and operator accounts). Every repository is generic over
//! `ConnectionTrait` so it can run against the pool or inside a transaction.

pub mod order;
pub mod user;
