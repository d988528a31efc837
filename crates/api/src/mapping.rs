//! Response translation for order aggregates.
//!
//! Pure, total functions from a loaded [`OrderAggregate`] to the flat
//! response shape. No validation happens here - everything was checked at
//! creation time - and nothing here can fail or touch I/O, so repeated
//! translation of the same aggregate is byte-for-byte identical.

use rust_decimal::Decimal;
use serde::Serialize;

use orders_core::OrderId;

use crate::models::{Address, OrderAggregate, OrderLine};

/// Date format used for `order_date` in responses.
const ORDER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Flat order representation returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderResponse {
    /// Order ID.
    pub order_id: OrderId,
    /// Order date formatted as `YYYY-MM-DD`.
    pub order_date: String,
    /// Total amount of the order.
    pub amount: Decimal,
    /// Customer's full name (first name + " " + last name).
    pub customer_name: String,
    /// Customer's email, passed through.
    pub customer_email: String,
    /// Customer's contact number, passed through.
    pub customer_phone: String,
    /// Customer's address, if one exists.
    pub address: Option<AddressResponse>,
    /// Line items.
    pub items: Vec<OrderItemResponse>,
}

/// Address fields, passed through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressResponse {
    pub street: String,
    pub city: String,
    pub zip_code: String,
}

/// A single line item in an order response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItemResponse {
    /// Product display name.
    pub product_name: String,
    /// Price per unit captured at order-creation time.
    pub unit_price: Decimal,
    /// Units ordered.
    pub quantity: i32,
    /// Line total: unit price × quantity.
    pub total_price: Decimal,
}

/// Translate a loaded order aggregate into its response shape.
#[must_use]
pub fn order_response(aggregate: &OrderAggregate) -> OrderResponse {
    OrderResponse {
        order_id: aggregate.order.id,
        order_date: aggregate
            .order
            .order_date
            .format(ORDER_DATE_FORMAT)
            .to_string(),
        amount: aggregate.order.amount,
        customer_name: aggregate.customer.full_name(),
        customer_email: aggregate.customer.email.clone(),
        customer_phone: aggregate.customer.phone.clone(),
        address: aggregate.address.as_ref().map(address_response),
        items: aggregate.lines.iter().map(order_item_response).collect(),
    }
}

/// Translate an address into its response shape.
#[must_use]
pub fn address_response(address: &Address) -> AddressResponse {
    AddressResponse {
        street: address.street.clone(),
        city: address.city.clone(),
        zip_code: address.zip_code.clone(),
    }
}

/// Translate one order line into its response shape.
///
/// The unit price is the snapshot recorded at order-creation time; changes
/// to the product's catalog price never show up in historical orders.
#[must_use]
pub fn order_item_response(line: &OrderLine) -> OrderItemResponse {
    OrderItemResponse {
        product_name: line.product.name.clone(),
        unit_price: line.item.unit_price,
        quantity: line.item.quantity.get(),
        total_price: line.item.line_total(),
    }
}
