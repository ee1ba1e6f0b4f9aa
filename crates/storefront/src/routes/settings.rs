//! Public site settings read.

use std::collections::HashMap;

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::SettingsRepository;
use crate::error::Result;
use crate::state::{AppState, CacheKey, CacheValue};

/// Fetch the settings map. `GET /api/settings`.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<HashMap<String, String>>> {
    if let Some(CacheValue::Settings(settings)) = state.cache().get(&CacheKey::Settings).await {
        return Ok(Json(settings));
    }

    let settings = SettingsRepository::new(state.pool()).get_all().await?;
    state
        .cache()
        .insert(CacheKey::Settings, CacheValue::Settings(settings.clone()))
        .await;

    Ok(Json(settings))
}
