//! Site settings reads.

use std::collections::HashMap;

use oli_poli_core::SiteSettings;
use sqlx::PgPool;

use super::RepositoryError;

/// Repository for settings reads.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the full key/value settings map.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_all(&self) -> Result<HashMap<String, String>, RepositoryError> {
        let rows = sqlx::query_as::<_, (String, String)>("SELECT key, value FROM settings")
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().collect())
    }

    /// Fetch the typed settings view.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_site_settings(&self) -> Result<SiteSettings, RepositoryError> {
        let map = self.get_all().await?;
        Ok(SiteSettings::from_map(&map))
    }
}
