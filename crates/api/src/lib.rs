//! BRAMANDA backend API library.
//!
//! This crate provides the HTTP API as a library, allowing it to be tested
//! and reused by the CLI.
//!
//! Every request is served by whichever store is reachable at that moment:
//! `PostgreSQL` when the pool answers within the configured timeout, the
//! in-memory fallback otherwise.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use routes::app;
pub use state::AppState;
