//! Domain types for the orders API.
//!
//! These types represent loaded domain objects separate from database row
//! types. They carry no navigation properties: the storage layer owns the
//! entity graph, and each request gets a read-only projection.

pub mod order;

pub use order::{Address, Customer, Order, OrderAggregate, OrderItem, OrderLine, Product};
