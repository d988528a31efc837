//! Order creation and retrieval.
//!
//! The create path validates referenced entities, prices every line from
//! the product's current catalog price, sums the total with exact decimal
//! arithmetic, and persists the order atomically before reloading the
//! aggregate for the response. The pricing and validation steps are pure
//! functions so they can be tested without a database.

use std::collections::HashSet;

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;

use orders_core::{CustomerId, OrderId, ProductId, Quantity};

use crate::db::orders::NewOrderItem;
use crate::db::{OrderRepository, RepositoryError};
use crate::error::AppError;
use crate::models::{OrderAggregate, Product};

/// Errors from order operations.
#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    /// The request contained no items.
    #[error("order must contain at least one item")]
    EmptyItems,

    /// An item carried a zero or negative quantity.
    #[error("invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity {
        /// The offending product reference.
        product_id: ProductId,
        /// The rejected quantity value.
        quantity: i32,
    },

    /// The referenced customer does not exist.
    #[error("customer with id {0} not found")]
    CustomerNotFound(CustomerId),

    /// At least one referenced product does not exist.
    #[error("one or more products in the order are invalid")]
    InvalidProducts,

    /// The requested order does not exist.
    #[error("order with id {0} not found")]
    OrderNotFound(OrderId),

    /// The order committed but could not be reloaded. Should be impossible.
    #[error("order {0} missing after creation")]
    MissingAfterCreate(OrderId),

    /// The summed total exceeded the representable decimal range.
    #[error("order total exceeds the representable amount range")]
    AmountOverflow,

    /// Storage failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::EmptyItems
            | OrderError::InvalidQuantity { .. }
            | OrderError::InvalidProducts => Self::BadRequest(err.to_string()),
            OrderError::CustomerNotFound(_) | OrderError::OrderNotFound(_) => {
                Self::NotFound(err.to_string())
            }
            OrderError::MissingAfterCreate(_) | OrderError::AmountOverflow => {
                Self::Internal(err.to_string())
            }
            OrderError::Repository(e) => Self::Database(e),
        }
    }
}

/// Input for creating an order.
#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    /// The customer placing the order.
    pub customer_id: CustomerId,
    /// Requested line items.
    pub items: Vec<OrderItemInput>,
}

/// A single requested line item.
#[derive(Debug, Clone)]
pub struct OrderItemInput {
    /// The product to order.
    pub product_id: ProductId,
    /// Requested quantity, validated by the service before anything is
    /// persisted.
    pub quantity: i32,
}

/// A requested item whose quantity has been validated.
#[derive(Debug, Clone, Copy)]
struct ValidatedItem {
    product_id: ProductId,
    quantity: Quantity,
}

/// Create an order for a customer.
///
/// Steps, in order, with no partial state on any failure:
/// 1. Validate the item list (non-empty, positive quantities).
/// 2. Resolve the customer.
/// 3. Resolve every distinct referenced product in one batch lookup.
/// 4. Price each line from the product's current price and sum the total.
/// 5. Persist order + items in one transaction.
/// 6. Reload the aggregate for the response.
///
/// # Errors
///
/// - [`OrderError::EmptyItems`] / [`OrderError::InvalidQuantity`] for a
///   malformed item list
/// - [`OrderError::CustomerNotFound`] for an unknown customer
/// - [`OrderError::InvalidProducts`] if any product reference is unknown
/// - [`OrderError::MissingAfterCreate`] if the committed order cannot be
///   reloaded (defensive check)
/// - [`OrderError::Repository`] for storage failures
pub async fn create_order(
    pool: &PgPool,
    input: CreateOrderInput,
) -> Result<OrderAggregate, OrderError> {
    let items = validate_items(&input.items)?;

    let repo = OrderRepository::new(pool);

    let customer = repo
        .find_customer(input.customer_id)
        .await?
        .ok_or(OrderError::CustomerNotFound(input.customer_id))?;

    let product_ids = distinct_product_ids(&items);
    let products = repo.find_products(&product_ids).await?;

    let priced = price_items(&items, &product_ids, &products)?;
    let amount = order_total(&priced)?;

    let order_id = repo
        .create_order(customer.id, Utc::now(), amount, &priced)
        .await?;

    tracing::info!(
        order_id = %order_id,
        customer_id = %customer.id,
        %amount,
        items = priced.len(),
        "order created"
    );

    repo.find_aggregate(order_id)
        .await?
        .ok_or(OrderError::MissingAfterCreate(order_id))
}

/// Fetch an order aggregate by ID.
///
/// # Errors
///
/// Returns [`OrderError::OrderNotFound`] if no such order exists, or
/// [`OrderError::Repository`] for storage failures.
pub async fn get_order(pool: &PgPool, id: OrderId) -> Result<OrderAggregate, OrderError> {
    OrderRepository::new(pool)
        .find_aggregate(id)
        .await?
        .ok_or(OrderError::OrderNotFound(id))
}

/// List all orders for a customer, ascending by order date.
///
/// A customer with no orders yields an empty list, never an error.
///
/// # Errors
///
/// Returns [`OrderError::Repository`] for storage failures.
pub async fn list_orders_for_customer(
    pool: &PgPool,
    customer_id: CustomerId,
) -> Result<Vec<OrderAggregate>, OrderError> {
    Ok(OrderRepository::new(pool)
        .list_aggregates_by_customer(customer_id)
        .await?)
}

/// Check the item list is non-empty and every quantity is positive.
fn validate_items(items: &[OrderItemInput]) -> Result<Vec<ValidatedItem>, OrderError> {
    if items.is_empty() {
        return Err(OrderError::EmptyItems);
    }

    items
        .iter()
        .map(|item| {
            let quantity =
                Quantity::new(item.quantity).map_err(|_| OrderError::InvalidQuantity {
                    product_id: item.product_id,
                    quantity: item.quantity,
                })?;
            Ok(ValidatedItem {
                product_id: item.product_id,
                quantity,
            })
        })
        .collect()
}

/// The distinct product IDs referenced by the item list.
///
/// Duplicate references to the same product are legal; each line is priced
/// independently, so validation only compares distinct counts.
fn distinct_product_ids(items: &[ValidatedItem]) -> Vec<ProductId> {
    let mut seen = HashSet::new();
    items
        .iter()
        .map(|item| item.product_id)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Price each requested line from the resolved products.
///
/// Fails with [`OrderError::InvalidProducts`] when fewer products resolved
/// than distinct IDs were requested.
fn price_items(
    items: &[ValidatedItem],
    requested_ids: &[ProductId],
    products: &[Product],
) -> Result<Vec<NewOrderItem>, OrderError> {
    if products.len() != requested_ids.len() {
        return Err(OrderError::InvalidProducts);
    }

    items
        .iter()
        .map(|item| {
            let product = products
                .iter()
                .find(|p| p.id == item.product_id)
                .ok_or(OrderError::InvalidProducts)?;
            Ok(NewOrderItem {
                product_id: item.product_id,
                quantity: item.quantity,
                unit_price: product.price,
            })
        })
        .collect()
}

/// Sum line contributions (unit price × quantity) with exact decimal
/// arithmetic.
///
/// Fails with [`OrderError::AmountOverflow`] if the multiplication or the
/// running sum leaves `Decimal`'s 96-bit range.
fn order_total(items: &[NewOrderItem]) -> Result<Decimal, OrderError> {
    items.iter().try_fold(Decimal::ZERO, |total, item| {
        let line = item
            .unit_price
            .checked_mul(Decimal::from(item.quantity.get()))
            .ok_or(OrderError::AmountOverflow)?;
        total.checked_add(line).ok_or(OrderError::AmountOverflow)
    })
}
