//! Order repository for database operations.
//!
//! All reads assemble [`OrderAggregate`] projections with explicit joins;
//! the write path persists an order and its items inside one transaction.
//! Queries are plain runtime queries bound through [`sqlx::query_as`], so
//! the crate builds without a live database.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use orders_core::{AddressId, CustomerId, OrderId, OrderItemId, ProductId, Quantity};

use super::RepositoryError;
use crate::models::{Address, Customer, Order, OrderAggregate, OrderItem, OrderLine, Product};

/// A line item to persist as part of a new order.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    /// The product the line references.
    pub product_id: ProductId,
    /// Units ordered (validated positive).
    pub quantity: Quantity,
    /// Price per unit at order-creation time.
    pub unit_price: Decimal,
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

/// Order header joined with its customer and optional address.
#[derive(sqlx::FromRow)]
struct OrderHeaderRow {
    order_id: i32,
    order_date: DateTime<Utc>,
    amount: Decimal,
    customer_id: i32,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
    address_id: Option<i32>,
    street: Option<String>,
    city: Option<String>,
    zip_code: Option<String>,
}

/// Order line joined with its product.
#[derive(sqlx::FromRow)]
struct OrderLineRow {
    order_id: i32,
    item_id: i32,
    product_id: i32,
    quantity: i32,
    unit_price: Decimal,
    product_name: String,
    product_price: Decimal,
    product_description: Option<String>,
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: i32,
    first_name: String,
    last_name: String,
    email: String,
    phone: String,
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    price: Decimal,
    description: Option<String>,
}

const ORDER_HEADER_COLUMNS: &str = r"
    SELECT o.id AS order_id,
           o.order_date,
           o.amount,
           c.id AS customer_id,
           c.first_name,
           c.last_name,
           c.email,
           c.phone,
           a.id AS address_id,
           a.street,
           a.city,
           a.zip_code
    FROM orders o
    JOIN customer c ON c.id = o.customer_id
    LEFT JOIN address a ON a.customer_id = c.id
";

const ORDER_LINE_COLUMNS: &str = r"
    SELECT oi.order_id,
           oi.id AS item_id,
           oi.product_id,
           oi.quantity,
           oi.unit_price,
           p.name AS product_name,
           p.price AS product_price,
           p.description AS product_description
    FROM order_item oi
    JOIN product p ON p.id = oi.product_id
";

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_customer(
        &self,
        id: CustomerId,
    ) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r"
            SELECT id, first_name, last_name, email, phone
            FROM customer
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| Customer {
            id: CustomerId::new(r.id),
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
            phone: r.phone,
        }))
    }

    /// Look up all products matching the given IDs in one batch query.
    ///
    /// IDs without a matching product are simply absent from the result;
    /// the caller compares counts to detect invalid references.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_products(
        &self,
        ids: &[ProductId],
    ) -> Result<Vec<Product>, RepositoryError> {
        let raw_ids: Vec<i32> = ids.iter().map(|id| id.as_i32()).collect();

        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, price, description
            FROM product
            WHERE id = ANY($1)
            ",
        )
        .bind(raw_ids)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| Product {
                id: ProductId::new(r.id),
                name: r.name,
                price: r.price,
                description: r.description,
            })
            .collect())
    }

    /// Persist an order and its items as a single atomic unit.
    ///
    /// Either every row is written or none are: the order header and all
    /// items share one transaction, and any failure rolls the whole thing
    /// back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn create_order(
        &self,
        customer_id: CustomerId,
        order_date: DateTime<Utc>,
        amount: Decimal,
        items: &[NewOrderItem],
    ) -> Result<OrderId, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let (order_id,): (i32,) = sqlx::query_as(
            r"
            INSERT INTO orders (order_date, amount, customer_id)
            VALUES ($1, $2, $3)
            RETURNING id
            ",
        )
        .bind(order_date)
        .bind(amount)
        .bind(customer_id.as_i32())
        .fetch_one(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                r"
                INSERT INTO order_item (order_id, product_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                ",
            )
            .bind(order_id)
            .bind(item.product_id.as_i32())
            .bind(item.quantity.get())
            .bind(item.unit_price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(OrderId::new(order_id))
    }

    /// Load an order aggregate (order + customer + address + lines with
    /// products) by order ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if stored rows violate domain
    /// invariants (e.g., a non-positive quantity).
    pub async fn find_aggregate(
        &self,
        id: OrderId,
    ) -> Result<Option<OrderAggregate>, RepositoryError> {
        let header_sql = format!("{ORDER_HEADER_COLUMNS} WHERE o.id = $1");
        let header = sqlx::query_as::<_, OrderHeaderRow>(&header_sql)
            .bind(id.as_i32())
            .fetch_optional(self.pool)
            .await?;

        let Some(header) = header else {
            return Ok(None);
        };

        // Item id order is insertion order, keeping repeated reads identical.
        let lines_sql = format!("{ORDER_LINE_COLUMNS} WHERE oi.order_id = $1 ORDER BY oi.id");
        let line_rows = sqlx::query_as::<_, OrderLineRow>(&lines_sql)
            .bind(id.as_i32())
            .fetch_all(self.pool)
            .await?;

        let lines = line_rows
            .into_iter()
            .map(order_line_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(aggregate_from_rows(header, lines)))
    }

    /// Load all order aggregates for a customer, ascending by order date
    /// (then order ID for determinism).
    ///
    /// A customer with no orders yields an empty vector, not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` if stored rows violate domain
    /// invariants.
    pub async fn list_aggregates_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<OrderAggregate>, RepositoryError> {
        let headers_sql = format!(
            "{ORDER_HEADER_COLUMNS} WHERE o.customer_id = $1 ORDER BY o.order_date, o.id"
        );
        let headers = sqlx::query_as::<_, OrderHeaderRow>(&headers_sql)
            .bind(customer_id.as_i32())
            .fetch_all(self.pool)
            .await?;

        if headers.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<i32> = headers.iter().map(|h| h.order_id).collect();
        let lines_sql =
            format!("{ORDER_LINE_COLUMNS} WHERE oi.order_id = ANY($1) ORDER BY oi.id");
        let line_rows = sqlx::query_as::<_, OrderLineRow>(&lines_sql)
            .bind(order_ids)
            .fetch_all(self.pool)
            .await?;

        let mut lines_by_order: std::collections::HashMap<i32, Vec<OrderLine>> =
            std::collections::HashMap::new();
        for row in line_rows {
            let order_id = row.order_id;
            let line = order_line_from_row(row)?;
            lines_by_order.entry(order_id).or_default().push(line);
        }

        Ok(headers
            .into_iter()
            .map(|header| {
                let lines = lines_by_order.remove(&header.order_id).unwrap_or_default();
                aggregate_from_rows(header, lines)
            })
            .collect())
    }
}

/// Convert a joined line row into a domain [`OrderLine`].
fn order_line_from_row(row: OrderLineRow) -> Result<OrderLine, RepositoryError> {
    let quantity = Quantity::new(row.quantity).map_err(|e| {
        RepositoryError::DataCorruption(format!(
            "invalid quantity for order item {}: {e}",
            row.item_id
        ))
    })?;

    Ok(OrderLine {
        item: OrderItem {
            id: OrderItemId::new(row.item_id),
            product_id: ProductId::new(row.product_id),
            quantity,
            unit_price: row.unit_price,
        },
        product: Product {
            id: ProductId::new(row.product_id),
            name: row.product_name,
            price: row.product_price,
            description: row.product_description,
        },
    })
}

/// Assemble an aggregate from a header row and its lines.
fn aggregate_from_rows(header: OrderHeaderRow, lines: Vec<OrderLine>) -> OrderAggregate {
    let address = match (header.address_id, header.street, header.city, header.zip_code) {
        (Some(id), Some(street), Some(city), Some(zip_code)) => Some(Address {
            id: AddressId::new(id),
            street,
            city,
            zip_code,
        }),
        _ => None,
    };

    OrderAggregate {
        order: Order {
            id: OrderId::new(header.order_id),
            order_date: header.order_date,
            amount: header.amount,
            customer_id: CustomerId::new(header.customer_id),
        },
        customer: Customer {
            id: CustomerId::new(header.customer_id),
            first_name: header.first_name,
            last_name: header.last_name,
            email: header.email,
            phone: header.phone,
        },
        address,
        lines,
    }
}
