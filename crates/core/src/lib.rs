//! Bramanda Core - Shared types library.
//!
//! This crate provides common types used across all Bramanda components:
//! - `api` - The commerce HTTP service
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. Database encodings are available behind the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Order numbers and the order/payment status enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
