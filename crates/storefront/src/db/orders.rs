//! Order creation from storefront submissions.

use oli_poli_core::Order;
use sqlx::PgPool;
use sqlx::types::Json;

use super::RepositoryError;

/// Repository for order writes.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, order: &Order) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO orders \
                 (id, name, phone, address, items, total, status, delivery_date, \
                  observations, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(order.id.as_str())
        .bind(&order.name)
        .bind(&order.phone)
        .bind(&order.address)
        .bind(Json(&order.items))
        .bind(order.total)
        .bind(order.status.as_str())
        .bind(order.delivery_date)
        .bind(order.observations.as_deref())
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}
