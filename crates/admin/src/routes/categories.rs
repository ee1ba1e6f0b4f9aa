//! Category management endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use oli_poli_core::slug::slugify;
use oli_poli_core::{Category, CategoryId};
use serde::Deserialize;
use tracing::instrument;

use crate::db::CategoryRepository;
use crate::error::{AppError, Result};
use crate::routes::products::{CreateResponse, MutationResponse};
use crate::state::AppState;

/// Category create/update request body.
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

fn validate(body: &CategoryRequest) -> Result<()> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    Ok(())
}

/// List categories. `GET /api/categories`.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = CategoryRepository::new(state.pool()).list().await?;
    Ok(Json(categories))
}

/// Get one category. `GET /api/categories/{id}`.
#[instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<Category>> {
    let category = CategoryRepository::new(state.pool())
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category {id}")))?;
    Ok(Json(category))
}

/// Create a category. `POST /api/categories`.
#[instrument(skip(state, body), fields(name = %body.name))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<CreateResponse>)> {
    validate(&body)?;

    let slug = slugify(&body.name);
    if slug.is_empty() {
        return Err(AppError::BadRequest(
            "name does not produce a usable id".to_string(),
        ));
    }

    let now = Utc::now();
    let category = Category {
        id: CategoryId::new(slug.clone()),
        name: body.name.trim().to_string(),
        description: body.description,
        icon: body.icon,
        created_at: now,
        updated_at: now,
    };

    CategoryRepository::new(state.pool())
        .create(&category)
        .await?;
    tracing::info!(category_id = %category.id, "category created");

    Ok((
        StatusCode::CREATED,
        Json(CreateResponse {
            id: slug,
            success: true,
        }),
    ))
}

/// Replace a category. `PUT /api/categories/{id}`.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
    Json(body): Json<CategoryRequest>,
) -> Result<Json<MutationResponse>> {
    validate(&body)?;

    let repo = CategoryRepository::new(state.pool());
    let existing = repo
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category {id}")))?;

    let category = Category {
        id,
        name: body.name.trim().to_string(),
        description: body.description,
        icon: body.icon,
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };

    repo.update(&category).await?;
    Ok(Json(MutationResponse { success: true }))
}

/// Delete a category. `DELETE /api/categories/{id}`.
///
/// Responds 409 while products still reference it.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<CategoryId>,
) -> Result<Json<MutationResponse>> {
    let deleted = CategoryRepository::new(state.pool()).delete(&id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("category {id}")));
    }
    tracing::info!(category_id = %id, "category deleted");
    Ok(Json(MutationResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_is_rejected() {
        let body = CategoryRequest {
            name: String::new(),
            description: String::new(),
            icon: String::new(),
        };
        assert!(matches!(validate(&body), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_named_request_passes() {
        let body = CategoryRequest {
            name: "Festa".to_string(),
            description: "Artigos de festa".to_string(),
            icon: "🎉".to_string(),
        };
        assert!(validate(&body).is_ok());
    }
}
