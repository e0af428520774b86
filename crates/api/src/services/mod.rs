//! Business logic services.
//!
//! # Services
//!
//! - `orders` - Order lifecycle (numbering, placement, payment verification)
//! - `newsletter` - Idempotent newsletter subscription
//! - `catalog` - Sample catalog seeding

pub mod catalog;
pub mod newsletter;
pub mod orders;

pub use catalog::{SeedOutcome, sample_products, seed_catalog, seed_durable};
pub use newsletter::{SubscribeOutcome, subscribe};
pub use orders::{OrderLifecycle, PaymentVerification, PlaceOrder, PlacedOrder};
