//! Core types for Bramanda.
//!
//! This module provides type-safe wrappers for order-related domain concepts.

pub mod order_number;
pub mod status;

pub use order_number::{OrderNumber, OrderNumberError};
pub use status::*;
