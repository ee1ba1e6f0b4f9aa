//! Site settings endpoints.

use std::collections::HashMap;

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::SettingsRepository;
use crate::error::Result;
use crate::routes::products::MutationResponse;
use crate::state::AppState;

/// Fetch the settings map. `GET /api/settings`.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Result<Json<HashMap<String, String>>> {
    let settings = SettingsRepository::new(state.pool()).get_all().await?;
    Ok(Json(settings))
}

/// Upsert settings from a key/value map. `PUT /api/settings`.
///
/// Keys absent from the body are left untouched.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Json(body): Json<HashMap<String, String>>,
) -> Result<Json<MutationResponse>> {
    let repo = SettingsRepository::new(state.pool());
    for (key, value) in &body {
        repo.upsert(key, value).await?;
    }
    tracing::info!(keys = body.len(), "settings updated");
    Ok(Json(MutationResponse { success: true }))
}
