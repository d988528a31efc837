//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! orders-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `ORDERS_DATABASE_URL` - `PostgreSQL` connection string
//!   (falls back to `DATABASE_URL`)
//!
//! Migration files live in `crates/api/migrations/` and are embedded into
//! the binary at compile time via `sqlx::migrate!`.

use sqlx::PgPool;

/// Errors from the migrate command.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run the orders database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database URL is missing, the connection
/// fails, or a migration fails to apply.
pub async fn run() -> Result<(), MigrationError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("ORDERS_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| MigrationError::MissingEnvVar("ORDERS_DATABASE_URL"))?;

    tracing::info!("Connecting to orders database...");
    let pool = PgPool::connect(&database_url).await?;

    tracing::info!("Running orders migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Orders migrations complete!");
    Ok(())
}
