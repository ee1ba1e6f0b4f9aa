//! Order management for the admin.
//!
//! Orders are read back through an intermediate row type because line
//! items live in a JSONB column and the status in a plain TEXT column;
//! both have to be parsed into their typed shapes.

use chrono::{DateTime, NaiveDate, Utc};
use oli_poli_core::cart::LineItem;
use oli_poli_core::{Order, OrderId, OrderStatus};
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::RepositoryError;

const ORDER_COLUMNS: &str = "id, name, phone, address, items, total, status, delivery_date, \
     observations, created_at, updated_at";

/// Raw order row as stored. Converted to [`Order`] after parsing the
/// JSONB items and the status string.
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: String,
    name: String,
    phone: String,
    address: String,
    items: serde_json::Value,
    total: Decimal,
    status: String,
    delivery_date: Option<NaiveDate>,
    observations: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let items: Vec<LineItem> = serde_json::from_value(row.items).map_err(|e| {
            RepositoryError::DataCorruption(format!("order {} items: {e}", row.id))
        })?;
        let status: OrderStatus = row.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("order {} status: {e}", row.id))
        })?;

        Ok(Self {
            id: OrderId::new(row.id),
            name: row.name,
            phone: row.phone,
            address: row.address,
            items,
            total: row.total,
            status,
            delivery_date: row.delivery_date,
            observations: row.observations,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for order management.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails and
    /// `RepositoryError::DataCorruption` if a stored order fails to parse.
    pub async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Get a single order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails and
    /// `RepositoryError::DataCorruption` if the stored order fails to parse.
    pub async fn get(&self, id: &OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    /// Update an order's status. Returns `false` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("UPDATE orders SET status = $2, updated_at = NOW() WHERE id = $1")
                .bind(id.as_str())
                .bind(status.as_str())
                .execute(self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Update an order's delivery date and observations. Returns `false`
    /// if no row matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_details(
        &self,
        id: &OrderId,
        delivery_date: Option<NaiveDate>,
        observations: Option<&str>,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            "UPDATE orders SET delivery_date = $2, observations = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id.as_str())
        .bind(delivery_date)
        .bind(observations)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete an order. Returns `false` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: &OrderId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id.as_str())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
