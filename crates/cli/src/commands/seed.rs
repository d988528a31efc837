//! Seed the database with demo data.
//!
//! Inserts a small fixed dataset for exercising the API by hand and from
//! the integration tests: two customers (one with an address, one without),
//! a three-product catalog, and one historical order. Inserts use explicit
//! IDs with `ON CONFLICT DO NOTHING`, so the command is idempotent.

use rust_decimal::Decimal;
use secrecy::SecretString;
use sqlx::PgPool;
use tracing::info;

use orders_api::db;

/// Errors from the seed command.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Seed demo customers, products, and one historical order.
///
/// # Errors
///
/// Returns `SeedError` if the database URL is missing or an insert fails.
pub async fn run() -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ORDERS_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| SeedError::MissingEnvVar("ORDERS_DATABASE_URL"))?;

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    seed_customers(&pool).await?;
    seed_products(&pool).await?;
    seed_demo_order(&pool).await?;
    fix_sequences(&pool).await?;

    info!("Seeding complete!");
    Ok(())
}

/// Demo customers: one with an address, one without any orders.
async fn seed_customers(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO customer (id, first_name, last_name, email, phone)
        VALUES
            (1, 'Pranaya', 'Rout', 'pranayarout@example.com', '1234567890'),
            (2, 'Hina', 'Sharma', 'hinasharma@example.com', '0987654321')
        ON CONFLICT (id) DO NOTHING
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r"
        INSERT INTO address (id, street, city, zip_code, customer_id)
        VALUES (1, '123 Main St', 'Jajpur', '755019', 1)
        ON CONFLICT (id) DO NOTHING
        ",
    )
    .execute(pool)
    .await?;

    info!("Seeded customers");
    Ok(())
}

/// Demo product catalog.
async fn seed_products(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO product (id, name, price, description)
        VALUES
            (1, 'Laptop', $1, 'High-performance laptop'),
            (2, 'Mouse', $2, 'Wireless mouse'),
            (3, 'Keyboard', $3, 'Mechanical keyboard')
        ON CONFLICT (id) DO NOTHING
        ",
    )
    .bind(Decimal::new(150_000, 2)) // 1500.00
    .bind(Decimal::new(2_500, 2)) // 25.00
    .bind(Decimal::new(5_000, 2)) // 50.00
    .execute(pool)
    .await?;

    info!("Seeded products");
    Ok(())
}

/// One historical order for customer 1: 1 Laptop + 2 Mice = 1550.00.
async fn seed_demo_order(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"
        INSERT INTO orders (id, order_date, amount, customer_id)
        VALUES (1, '2025-05-05T00:00:00Z', $1, 1)
        ON CONFLICT (id) DO NOTHING
        ",
    )
    .bind(Decimal::new(155_000, 2)) // 1550.00
    .execute(pool)
    .await?;

    sqlx::query(
        r"
        INSERT INTO order_item (id, order_id, product_id, quantity, unit_price)
        VALUES
            (1, 1, 1, 1, $1),
            (2, 1, 2, 2, $2)
        ON CONFLICT (id) DO NOTHING
        ",
    )
    .bind(Decimal::new(150_000, 2))
    .bind(Decimal::new(2_500, 2))
    .execute(pool)
    .await?;

    info!("Seeded demo order");
    Ok(())
}

/// Advance the serial sequences past the explicitly-seeded IDs so new
/// inserts don't collide.
async fn fix_sequences(pool: &PgPool) -> Result<(), sqlx::Error> {
    for table in ["customer", "address", "product", "orders", "order_item"] {
        let statement = format!(
            "SELECT setval(pg_get_serial_sequence('{table}', 'id'), \
             (SELECT COALESCE(MAX(id), 1) FROM {table}))"
        );
        sqlx::query(&statement).execute(pool).await?;
    }
    Ok(())
}
