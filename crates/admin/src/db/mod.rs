//! Database operations for the admin.
//!
//! The admin owns all catalog and settings writes, plus order management.
//! It shares the storefront's database; the split is network-level, not
//! schema-level.

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
    /// A write collided with an existing record.
    #[error("already exists: {0}")]
    Conflict(String),
}

/// Map a unique-constraint violation to `Conflict`, everything else to
/// `Database`.
fn map_insert_error(err: sqlx::Error, what: impl Into<String>) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::Conflict(what.into())
        }
        _ => RepositoryError::Database(err),
    }
}

/// Map a foreign-key violation to `Conflict`, everything else to
/// `Database`.
fn map_delete_error(err: sqlx::Error, what: impl Into<String>) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            RepositoryError::Conflict(what.into())
        }
        _ => RepositoryError::Database(err),
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_constraint_errors_pass_through_as_database() {
        let err = map_insert_error(sqlx::Error::RowNotFound, "product x");
        assert!(matches!(err, RepositoryError::Database(_)));

        let err = map_delete_error(sqlx::Error::RowNotFound, "category y");
        assert!(matches!(err, RepositoryError::Database(_)));
    }
}
