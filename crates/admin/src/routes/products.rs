//! Product management endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use oli_poli_core::slug::slugify;
use oli_poli_core::{CategoryId, Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::{CategoryRepository, ProductRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product create/update request body.
///
/// On create the id is derived from the name via slugification; on update
/// the id in the path wins and the name may change freely.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub category: CategoryId,
    #[serde(default)]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub image_url: Option<String>,
    pub emoji: Option<String>,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

/// Shared create response, also used by the category endpoints.
#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub id: String,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub success: bool,
}

/// Validate a product request before it touches the database.
fn validate(body: &ProductRequest) -> Result<()> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    if body.price < Decimal::ZERO {
        return Err(AppError::BadRequest("price cannot be negative".to_string()));
    }
    if body.stock < 0 {
        return Err(AppError::BadRequest("stock cannot be negative".to_string()));
    }
    Ok(())
}

/// Check that the referenced category exists.
async fn require_category(state: &AppState, id: &CategoryId) -> Result<()> {
    if CategoryRepository::new(state.pool())
        .get(id)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest(format!("unknown category: {id}")));
    }
    Ok(())
}

/// List all products, active or not. `GET /api/products`.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// Get one product. `GET /api/products/{id}`.
#[instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;
    Ok(Json(product))
}

/// Create a product. `POST /api/products`.
#[instrument(skip(state, body), fields(name = %body.name))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<ProductRequest>,
) -> Result<(StatusCode, Json<CreateResponse>)> {
    validate(&body)?;
    require_category(&state, &body.category).await?;

    let slug = slugify(&body.name);
    if slug.is_empty() {
        return Err(AppError::BadRequest(
            "name does not produce a usable id".to_string(),
        ));
    }

    let now = Utc::now();
    let product = Product {
        id: ProductId::new(slug),
        name: body.name.trim().to_string(),
        category: body.category,
        description: body.description,
        price: body.price,
        image_url: body.image_url,
        emoji: body.emoji,
        stock: body.stock,
        featured: body.featured,
        active: body.active,
        created_at: now,
        updated_at: now,
    };

    ProductRepository::new(state.pool()).create(&product).await?;
    tracing::info!(product_id = %product.id, "product created");

    Ok((
        StatusCode::CREATED,
        Json(CreateResponse {
            id: product.id.to_string(),
            success: true,
        }),
    ))
}

/// Replace a product. `PUT /api/products/{id}`.
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(body): Json<ProductRequest>,
) -> Result<Json<MutationResponse>> {
    validate(&body)?;
    require_category(&state, &body.category).await?;

    let repo = ProductRepository::new(state.pool());
    let existing = repo
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let product = Product {
        id,
        name: body.name.trim().to_string(),
        category: body.category,
        description: body.description,
        price: body.price,
        image_url: body.image_url,
        emoji: body.emoji,
        stock: body.stock,
        featured: body.featured,
        active: body.active,
        created_at: existing.created_at,
        updated_at: Utc::now(),
    };

    repo.update(&product).await?;
    Ok(Json(MutationResponse { success: true }))
}

/// Delete a product. `DELETE /api/products/{id}`.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<MutationResponse>> {
    let deleted = ProductRepository::new(state.pool()).delete(&id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("product {id}")));
    }
    tracing::info!(product_id = %id, "product deleted");
    Ok(Json(MutationResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ProductRequest {
        ProductRequest {
            name: "Cofrinho Unicórnio".to_string(),
            category: CategoryId::new("brinquedos"),
            description: String::new(),
            price: "29.90".parse().expect("decimal"),
            image_url: None,
            emoji: Some("🦄".to_string()),
            stock: 10,
            featured: false,
            active: true,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate(&request()).is_ok());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut body = request();
        body.name = "  ".to_string();
        assert!(matches!(validate(&body), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_negative_price_and_stock_are_rejected() {
        let mut body = request();
        body.price = "-0.01".parse().expect("decimal");
        assert!(matches!(validate(&body), Err(AppError::BadRequest(_))));

        let mut body = request();
        body.stock = -1;
        assert!(matches!(validate(&body), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_id_derivation_folds_accents() {
        assert_eq!(slugify("Cofrinho Unicórnio"), "cofrinho-unicornio");
    }
}
