//! Database operations for the storefront.
//!
//! The storefront reads the catalog and settings and writes orders; all
//! catalog/settings mutation happens through the admin binary against the
//! same database.
//!
//! ## Tables
//!
//! - `products` / `categories` - Catalog (admin-managed)
//! - `orders` - Submitted orders (created here, managed by admin)
//! - `settings` - Key/value site settings
//! - `tower_sessions.session` - Tower-sessions storage (holds the cart slot)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p oli-poli-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod categories;
pub mod orders;
pub mod products;
pub mod settings;

pub use categories::CategoryRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use settings::SettingsRepository;

/// Error type for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    /// A stored value failed to parse into its typed shape.
    #[error("stored data is corrupt: {0}")]
    DataCorruption(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
