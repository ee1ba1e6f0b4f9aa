//! Read-only category queries for the public catalog.

use oli_poli_core::Category;
use sqlx::PgPool;

use super::RepositoryError;

/// Repository for category reads.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories, name ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, icon, created_at, updated_at \
             FROM categories ORDER BY name ASC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }
}
