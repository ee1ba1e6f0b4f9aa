//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Catalog (read-only)
//! GET  /api/products           - Active products, newest first
//! GET  /api/products/{id}      - Product detail
//! GET  /api/categories         - Categories, name ascending
//! GET  /api/settings           - Site settings map
//!
//! # Cart (session-backed)
//! GET  /api/cart               - Current cart summary
//! POST /api/cart/add           - Add item (merges on re-add)
//! POST /api/cart/update        - Set quantity (< 1 removes)
//! POST /api/cart/remove        - Remove item
//! POST /api/cart/clear         - Empty the cart
//! GET  /api/cart/count         - Badge count
//!
//! # Submission (rate limited)
//! POST /api/cart/checkout      - WhatsApp hand-off, clears the cart
//! POST /api/orders             - Create a pending order
//! ```

pub mod cart;
pub mod catalog;
pub mod orders;
pub mod settings;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_products))
        .route("/{id}", get(catalog::show_product))
}

/// Create the cart routes router (checkout is mounted separately so the
/// submission rate limiter covers it).
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the rate-limited submission routes router.
pub fn submission_routes() -> Router<AppState> {
    Router::new()
        .route("/cart/checkout", post(cart::checkout))
        .route("/orders", post(orders::create))
        .route_layer(middleware::submission_rate_limiter())
}

/// Create all API routes for the storefront (mounted under `/api`).
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .route("/categories", get(catalog::list_categories))
        .route("/settings", get(settings::show))
        .nest("/cart", cart_routes())
        .merge(submission_routes())
}
