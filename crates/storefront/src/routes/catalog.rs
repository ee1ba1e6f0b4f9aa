//! Public catalog route handlers.
//!
//! Read-only from the shop's perspective: products and categories are
//! managed by the admin binary. List reads go through the short-lived
//! state cache.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use oli_poli_core::{Category, Product, ProductId};
use serde::Deserialize;
use tracing::instrument;

use crate::db::{CategoryRepository, ProductRepository};
use crate::error::{AppError, Result};
use crate::state::{AppState, CacheKey, CacheValue};

/// Query parameters for the product listing.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListQuery {
    /// Restrict the listing to one category slug.
    pub category: Option<String>,
}

/// List active products, newest first. `GET /api/products`.
#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Vec<Product>>> {
    // Category-filtered listings bypass the cache; the unfiltered list is
    // the hot path.
    if let Some(category) = query.category {
        let products = ProductRepository::new(state.pool())
            .list_active_in_category(&category)
            .await?;
        return Ok(Json(products));
    }

    if let Some(CacheValue::Products(products)) = state.cache().get(&CacheKey::Products).await {
        return Ok(Json(products));
    }

    let products = ProductRepository::new(state.pool()).list_active().await?;
    state
        .cache()
        .insert(CacheKey::Products, CacheValue::Products(products.clone()))
        .await;

    Ok(Json(products))
}

/// Get a single product. `GET /api/products/{id}`.
#[instrument(skip(state))]
pub async fn show_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let id = ProductId::new(id);
    ProductRepository::new(state.pool())
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// List categories, name ascending. `GET /api/categories`.
#[instrument(skip(state))]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    if let Some(CacheValue::Categories(categories)) = state.cache().get(&CacheKey::Categories).await
    {
        return Ok(Json(categories));
    }

    let categories = CategoryRepository::new(state.pool()).list().await?;
    state
        .cache()
        .insert(CacheKey::Categories, CacheValue::Categories(categories.clone()))
        .await;

    Ok(Json(categories))
}
