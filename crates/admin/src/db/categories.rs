//! Category CRUD for the admin.

use oli_poli_core::{Category, CategoryId};
use sqlx::PgPool;

use super::{RepositoryError, map_delete_error, map_insert_error};

const CATEGORY_COLUMNS: &str = "id, name, description, icon, created_at, updated_at";

/// Repository for category management.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List categories, name ascending.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name ASC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Get a single category by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: &CategoryId) -> Result<Option<Category>, RepositoryError> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(category)
    }

    /// Insert a new category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the id is already taken and
    /// `RepositoryError::Database` for other failures.
    pub async fn create(&self, category: &Category) -> Result<(), RepositoryError> {
        sqlx::query(&format!(
            "INSERT INTO categories ({CATEGORY_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6)"
        ))
        .bind(category.id.as_str())
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.icon)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(self.pool)
        .await
        .map_err(|e| map_insert_error(e, format!("category {}", category.id)))?;

        Ok(())
    }

    /// Update an existing category. Returns `false` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(&self, category: &Category) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE categories SET \
                 name = $2, description = $3, icon = $4, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(category.id.as_str())
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.icon)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a category. Returns `false` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` while products still reference
    /// the category (foreign key) and `RepositoryError::Database` for
    /// other failures.
    pub async fn delete(&self, id: &CategoryId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.as_str())
            .execute(self.pool)
            .await
            .map_err(|e| map_delete_error(e, format!("category {id} still has products")))?;

        Ok(result.rows_affected() > 0)
    }

    /// Insert or replace a category by id. Used by seeding.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn upsert(&self, category: &Category) -> Result<(), RepositoryError> {
        sqlx::query(&format!(
            "INSERT INTO categories ({CATEGORY_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (id) DO UPDATE SET \
                 name = EXCLUDED.name, description = EXCLUDED.description, \
                 icon = EXCLUDED.icon, updated_at = NOW()"
        ))
        .bind(category.id.as_str())
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.icon)
        .bind(category.created_at)
        .bind(category.updated_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
