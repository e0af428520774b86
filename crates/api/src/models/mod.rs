//! Domain models shared by both storage paths.
//!
//! Every model serializes to the same camelCase JSON shape regardless of
//! whether it came from `PostgreSQL` or the in-memory fallback.

pub mod order;
pub mod product;
pub mod subscriber;

pub use order::{CustomerInfo, NewOrder, Order, OrderItem};
pub use product::{NewProduct, Product};
pub use subscriber::{NewSubscriber, Subscriber};
