//! Product CRUD for the admin.

use oli_poli_core::{Product, ProductId};
use sqlx::PgPool;

use super::{RepositoryError, map_insert_error};

const PRODUCT_COLUMNS: &str = "id, name, category, description, price, image_url, emoji, \
     stock, featured, active, created_at, updated_at";

/// Repository for product management.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every product, active or not, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Get a single product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the id is already taken and
    /// `RepositoryError::Database` for other failures.
    pub async fn create(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query(&format!(
            "INSERT INTO products ({PRODUCT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)"
        ))
        .bind(product.id.as_str())
        .bind(&product.name)
        .bind(product.category.as_str())
        .bind(&product.description)
        .bind(product.price)
        .bind(product.image_url.as_deref())
        .bind(product.emoji.as_deref())
        .bind(product.stock)
        .bind(product.featured)
        .bind(product.active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(self.pool)
        .await
        .map_err(|e| map_insert_error(e, format!("product {}", product.id)))?;

        Ok(())
    }

    /// Update an existing product. Returns `false` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(&self, product: &Product) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE products SET \
                 name = $2, category = $3, description = $4, price = $5, \
                 image_url = $6, emoji = $7, stock = $8, featured = $9, \
                 active = $10, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(product.id.as_str())
        .bind(&product.name)
        .bind(product.category.as_str())
        .bind(&product.description)
        .bind(product.price)
        .bind(product.image_url.as_deref())
        .bind(product.emoji.as_deref())
        .bind(product.stock)
        .bind(product.featured)
        .bind(product.active)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a product. Returns `false` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: &ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_str())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Insert or replace a product by id. Used by seeding.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn upsert(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query(&format!(
            "INSERT INTO products ({PRODUCT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             ON CONFLICT (id) DO UPDATE SET \
                 name = EXCLUDED.name, category = EXCLUDED.category, \
                 description = EXCLUDED.description, price = EXCLUDED.price, \
                 image_url = EXCLUDED.image_url, emoji = EXCLUDED.emoji, \
                 stock = EXCLUDED.stock, featured = EXCLUDED.featured, \
                 active = EXCLUDED.active, updated_at = NOW()"
        ))
        .bind(product.id.as_str())
        .bind(&product.name)
        .bind(product.category.as_str())
        .bind(&product.description)
        .bind(product.price)
        .bind(product.image_url.as_deref())
        .bind(product.emoji.as_deref())
        .bind(product.stock)
        .bind(product.featured)
        .bind(product.active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
