//! HTTP route handlers for the orders API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (database ping)
//!
//! # Orders
//! POST /api/orders                      - Create an order (201 + Location)
//! GET  /api/orders/{id}                 - Order detail
//! GET  /api/orders/customer/{id}        - All orders for a customer
//! ```

pub mod orders;

use axum::Router;

use crate::state::AppState;

/// Create all routes for the orders API.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/api/orders", orders::router())
}
