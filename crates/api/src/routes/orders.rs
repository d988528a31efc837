//! Order API handlers.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;

use orders_core::{CustomerId, OrderId, ProductId};

use crate::error::{AppError, Result};
use crate::mapping::{OrderResponse, order_response};
use crate::services::orders::{self, CreateOrderInput, OrderItemInput};
use crate::state::AppState;

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_order))
        .route("/{id}", get(get_order_by_id))
        .route("/customer/{customer_id}", get(get_orders_by_customer))
}

/// Request body for creating an order.
#[derive(Debug, Deserialize)]
pub struct OrderCreateRequest {
    /// The customer placing the order.
    pub customer_id: CustomerId,
    /// Requested line items. Must be non-empty.
    #[serde(default)]
    pub items: Vec<OrderItemCreateRequest>,
}

/// A requested line item.
#[derive(Debug, Deserialize)]
pub struct OrderItemCreateRequest {
    /// The product to order.
    pub product_id: ProductId,
    /// Requested quantity. Validated server-side; zero and negative values
    /// are rejected before anything is persisted.
    pub quantity: i32,
}

impl From<OrderCreateRequest> for CreateOrderInput {
    fn from(request: OrderCreateRequest) -> Self {
        Self {
            customer_id: request.customer_id,
            items: request
                .items
                .into_iter()
                .map(|item| OrderItemInput {
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

/// Create a new order.
///
/// Returns `201 Created` with a `Location` header pointing at the
/// retrieval endpoint for the new order.
///
/// # Errors
///
/// - `400` for a malformed or undeserializable body, an empty item list,
///   non-positive quantity, or unknown product reference
/// - `404` for an unknown customer
/// - `500` for storage failures (nothing is partially committed)
pub async fn create_order(
    State(state): State<AppState>,
    body: std::result::Result<Json<OrderCreateRequest>, JsonRejection>,
) -> Result<Response> {
    let Json(body) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let aggregate = orders::create_order(state.pool(), body.into()).await?;
    let response = order_response(&aggregate);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, order_location(response.order_id))],
        Json(response),
    )
        .into_response())
}

/// Fetch a single order with customer, address, and item detail.
///
/// # Errors
///
/// Returns `404` if no order with the given ID exists.
pub async fn get_order_by_id(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderResponse>> {
    let aggregate = orders::get_order(state.pool(), id).await?;
    Ok(Json(order_response(&aggregate)))
}

/// List all orders for a customer, ascending by order date.
///
/// A customer with no orders gets `200` with an empty array, never an
/// error.
pub async fn get_orders_by_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<CustomerId>,
) -> Result<Json<Vec<OrderResponse>>> {
    let aggregates = orders::list_orders_for_customer(state.pool(), customer_id).await?;
    Ok(Json(aggregates.iter().map(order_response).collect()))
}

/// The retrieval URL for an order, used in the `Location` header.
fn order_location(id: OrderId) -> String {
    format!("/api/orders/{id}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_location() {
        assert_eq!(order_location(OrderId::new(42)), "/api/orders/42");
    }

    #[test]
    fn test_create_request_deserializes() {
        let request: OrderCreateRequest = serde_json::from_str(
            r#"{"customer_id": 1, "items": [{"product_id": 2, "quantity": 3}]}"#,
        )
        .unwrap();

        assert_eq!(request.customer_id, CustomerId::new(1));
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].product_id, ProductId::new(2));
        assert_eq!(request.items[0].quantity, 3);
    }

    #[test]
    fn test_create_request_missing_items_defaults_to_empty() {
        // An absent items array deserializes to an empty list, which the
        // service then rejects as invalid input.
        let request: OrderCreateRequest = serde_json::from_str(r#"{"customer_id": 1}"#).unwrap();
        assert!(request.items.is_empty());
    }

    #[test]
    fn test_create_request_converts_to_service_input() {
        let request = OrderCreateRequest {
            customer_id: CustomerId::new(5),
            items: vec![OrderItemCreateRequest {
                product_id: ProductId::new(7),
                quantity: 2,
            }],
        };

        let input = CreateOrderInput::from(request);
        assert_eq!(input.customer_id, CustomerId::new(5));
        assert_eq!(input.items.len(), 1);
        assert_eq!(input.items[0].quantity, 2);
    }
}
