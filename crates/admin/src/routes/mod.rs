//! HTTP route handlers for the admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//! GET  /health/ready                - Readiness check (database)
//!
//! # Products
//! GET    /api/products              - All products (active and inactive)
//! POST   /api/products              - Create (id slugged from name)
//! GET    /api/products/{id}         - Product detail
//! PUT    /api/products/{id}         - Replace
//! DELETE /api/products/{id}         - Delete
//!
//! # Categories
//! GET    /api/categories            - All categories
//! POST   /api/categories            - Create (id slugged from name)
//! GET    /api/categories/{id}       - Category detail
//! PUT    /api/categories/{id}       - Replace
//! DELETE /api/categories/{id}       - Delete (blocked while referenced)
//!
//! # Orders
//! GET    /api/orders                - All orders, newest first
//! GET    /api/orders/{id}           - Order detail
//! PATCH  /api/orders/{id}           - Delivery date / observations
//! PATCH  /api/orders/{id}/status    - Status transition
//! DELETE /api/orders/{id}           - Delete
//!
//! # Settings
//! GET    /api/settings              - Settings map
//! PUT    /api/settings              - Upsert settings from a map
//! ```

pub mod categories;
pub mod orders;
pub mod products;
pub mod settings;

use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list))
        .route("/", post(products::create))
        .route("/{id}", get(products::get))
        .route("/{id}", put(products::update))
        .route("/{id}", delete(products::delete))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::list))
        .route("/", post(categories::create))
        .route("/{id}", get(categories::get))
        .route("/{id}", put(categories::update))
        .route("/{id}", delete(categories::delete))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list))
        .route("/{id}", get(orders::get))
        .route("/{id}", patch(orders::update_details))
        .route("/{id}/status", patch(orders::update_status))
        .route("/{id}", delete(orders::delete))
}

/// Create all API routes for the admin (mounted under `/api`).
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/categories", category_routes())
        .nest("/orders", order_routes())
        .route("/settings", get(settings::show))
        .route("/settings", put(settings::update))
}
