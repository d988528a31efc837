//! Integration tests for the orders API.
//!
//! # Running Tests
//!
//! ```bash
//! # Start PostgreSQL, migrate, and seed
//! cargo run -p orders-cli -- migrate
//! cargo run -p orders-cli -- seed
//!
//! # Start the API
//! cargo run -p orders-api
//!
//! # Run the ignored end-to-end tests
//! cargo test -p orders-integration-tests -- --ignored
//! ```
//!
//! Tests target a live server and assume the seeded demo data: customer 1
//! (Pranaya Rout, with address), customer 2 (no orders), products 1-3
//! (Laptop 1500.00, Mouse 25.00, Keyboard 50.00).

/// Base URL for the orders API (configurable via environment).
#[must_use]
pub fn api_base_url() -> String {
    std::env::var("ORDERS_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}
