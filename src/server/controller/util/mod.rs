//! Utility functions for controller request handling.
//!
//! This module provides reusable helper functions used across controllers, such as resolving
//! the logged in user for protected endpoints.

pub mod get_user;
