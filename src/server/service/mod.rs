//! Service layer for business logic.
//!
//! This module contains the service layer that implements business logic and coordinates
//! between repositories. Services include operator authentication and profile management,
//! order search, editing, deletion and spreadsheet ingestion, and the retry logic used for
//! database reads.

pub mod auth;
pub mod order;
pub mod retry;
