//! Order domain types.
//!
//! An [`OrderAggregate`] is an order together with its owning customer, the
//! customer's address (if any), and every line item paired with its product.
//! Aggregates are assembled by the repository with explicit joins and are
//! immutable once loaded.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use orders_core::{AddressId, CustomerId, OrderId, OrderItemId, ProductId, Quantity};

/// A customer (domain type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    /// Unique customer ID.
    pub id: CustomerId,
    /// Customer's first name.
    pub first_name: String,
    /// Customer's last name.
    pub last_name: String,
    /// Customer's email address.
    pub email: String,
    /// Customer's contact number.
    pub phone: String,
}

impl Customer {
    /// The customer's full display name (first name + " " + last name).
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A customer's address (domain type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    /// Unique address ID.
    pub id: AddressId,
    /// Street line.
    pub street: String,
    /// City name.
    pub city: String,
    /// Postal code.
    pub zip_code: String,
}

/// A product in the catalog (domain type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product display name.
    pub name: String,
    /// Current price (positive, two fractional digits).
    pub price: Decimal,
    /// Optional product description.
    pub description: Option<String>,
}

/// An order header (domain type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// When the order was placed.
    pub order_date: DateTime<Utc>,
    /// Total amount, equal to the sum of line contributions at creation.
    pub amount: Decimal,
    /// The customer who placed the order.
    pub customer_id: CustomerId,
}

/// A single line item within an order (domain type).
///
/// `unit_price` is the product price captured at order-creation time. It is
/// immutable: later changes to the product's catalog price never alter it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    /// Unique order item ID.
    pub id: OrderItemId,
    /// The product this line references.
    pub product_id: ProductId,
    /// How many units were ordered.
    pub quantity: Quantity,
    /// Price per unit at order-creation time.
    pub unit_price: Decimal,
}

impl OrderItem {
    /// The line contribution: unit price at order time × quantity.
    ///
    /// `unit_price` comes from a `NUMERIC(18, 2)` column and `quantity`
    /// from an `INTEGER` column, so the product stays within `Decimal`'s
    /// 96-bit range and the multiplication cannot overflow.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity.get())
    }
}

/// An order line joined with its product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    /// The persisted order item.
    pub item: OrderItem,
    /// The referenced product.
    pub product: Product,
}

/// An order with everything needed to build a response: the order header,
/// the owning customer, the customer's address (if any), and each line item
/// with its product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAggregate {
    /// The order header.
    pub order: Order,
    /// The customer who placed the order.
    pub customer: Customer,
    /// The customer's address, if one exists.
    pub address: Option<Address>,
    /// Line items in insertion order.
    pub lines: Vec<OrderLine>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_concatenates_with_space() {
        let customer = Customer {
            id: CustomerId::new(1),
            first_name: "Pranaya".to_string(),
            last_name: "Rout".to_string(),
            email: "pranayarout@example.com".to_string(),
            phone: "1234567890".to_string(),
        };
        assert_eq!(customer.full_name(), "Pranaya Rout");
    }

    #[test]
    fn test_line_total_is_exact_decimal() {
        let item = OrderItem {
            id: OrderItemId::new(1),
            product_id: ProductId::new(2),
            quantity: Quantity::new(2).unwrap(),
            unit_price: Decimal::new(2500, 2), // 25.00
        };
        assert_eq!(item.line_total(), Decimal::new(5000, 2)); // 50.00
    }

    #[test]
    fn test_line_total_extreme_stored_values_stay_in_range() {
        // Largest NUMERIC(18,2) price and largest INTEGER quantity.
        let item = OrderItem {
            id: OrderItemId::new(1),
            product_id: ProductId::new(1),
            quantity: Quantity::new(i32::MAX).unwrap(),
            unit_price: Decimal::new(999_999_999_999_999_999, 2),
        };

        let expected = Decimal::from_i128_with_scale(
            999_999_999_999_999_999_i128 * i128::from(i32::MAX),
            2,
        );
        assert_eq!(item.line_total(), expected);
    }
}
