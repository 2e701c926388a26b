//! Utility functions and helpers for server operations.
//!
//! This module provides reusable, side-effect free helpers used across services: masking of
//! sensitive order fields for display, argon2 password hashing, and parsing of the loosely
//! formatted dates found in uploaded spreadsheets.

pub mod mask;
pub mod password;
pub mod time;
