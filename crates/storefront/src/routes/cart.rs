//! Cart route handlers.
//!
//! The cart lives in the session under a fixed slot key and is
//! re-persisted in full on every mutation. Each mutation response carries
//! the fresh [`CartSummary`] so the count badge and panel stay in sync
//! without a separate notification channel.
//!
//! Persistence failure semantics: an unreadable slot loads as an empty
//! cart; a failed save is logged as a warning and the in-memory cart
//! stays authoritative for the response.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use oli_poli_core::whatsapp;
use oli_poli_core::{Cart, CartSummary, LineItem, ProductId};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::db::{ProductRepository, SettingsRepository};
use crate::error::{AppError, Result};
use crate::models::session::keys;
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session slot.
///
/// An absent or unreadable slot yields an empty cart; initialization
/// never fails.
async fn load_cart(session: &Session) -> Cart {
    match session.get::<Vec<LineItem>>(keys::CART).await {
        Ok(Some(items)) => Cart::from_items(items),
        Ok(None) => Cart::new(),
        Err(e) => {
            tracing::warn!("failed to read cart slot, starting empty: {e}");
            Cart::new()
        }
    }
}

/// Persist the cart back to the session slot.
///
/// A write failure is non-fatal: the in-memory cart remains authoritative
/// for this request and the failure is surfaced as a warning.
async fn save_cart(session: &Session, cart: &Cart) {
    if let Err(e) = session.insert(keys::CART, cart.items()).await {
        tracing::warn!("failed to persist cart slot: {e}");
    }
}

// =============================================================================
// Request / Response Types
// =============================================================================

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: String,
    pub quantity: Option<u32>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub product_id: String,
    pub quantity: u32,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: String,
}

/// Badge count response.
#[derive(Debug, Serialize)]
pub struct CartCountResponse {
    pub count: u32,
}

/// Checkout response.
///
/// `whatsapp_url` is `null` when the cart was empty: submitting an empty
/// cart is a recoverable no-op, not an error.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub whatsapp_url: Option<String>,
    pub cart: CartSummary,
}

// =============================================================================
// Handlers
// =============================================================================

/// Show the current cart. `GET /api/cart`.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Json<CartSummary> {
    Json(load_cart(&session).await.summary())
}

/// Add an item to the cart. `POST /api/cart/add`.
///
/// Snapshots the product's current name/price/image/emoji into the line
/// item; later catalog edits do not touch carts.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<AddToCartRequest>,
) -> Result<Json<CartSummary>> {
    let id = ProductId::new(body.product_id);
    let product = ProductRepository::new(state.pool())
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let mut cart = load_cart(&session).await;
    cart.add_item(&product, body.quantity.unwrap_or(1));
    save_cart(&session, &cart).await;

    Ok(Json(cart.summary()))
}

/// Update an item's quantity. `POST /api/cart/update`.
///
/// A quantity below 1 removes the item; an unknown id is a silent no-op.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Json(body): Json<UpdateCartRequest>,
) -> Json<CartSummary> {
    let mut cart = load_cart(&session).await;
    cart.update_quantity(&ProductId::new(body.product_id), body.quantity);
    save_cart(&session, &cart).await;

    Json(cart.summary())
}

/// Remove an item. `POST /api/cart/remove`.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(body): Json<RemoveFromCartRequest>,
) -> Json<CartSummary> {
    let mut cart = load_cart(&session).await;
    cart.remove_item(&ProductId::new(body.product_id));
    save_cart(&session, &cart).await;

    Json(cart.summary())
}

/// Empty the cart unconditionally. `POST /api/cart/clear`.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Json<CartSummary> {
    let mut cart = load_cart(&session).await;
    cart.clear();
    save_cart(&session, &cart).await;

    Json(cart.summary())
}

/// Get the badge count. `GET /api/cart/count`.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Json<CartCountResponse> {
    let cart = load_cart(&session).await;
    Json(CartCountResponse { count: cart.count() })
}

/// Hand the cart off to WhatsApp. `POST /api/cart/checkout`.
///
/// Composes the order message, builds the `wa.me` deep link, then clears
/// the cart and closes the panel. The clear is unconditional once the
/// link is composed; the client performs the actual navigation.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Response> {
    let mut cart = load_cart(&session).await;

    let settings = SettingsRepository::new(state.pool()).get_site_settings().await?;
    if settings.whatsapp.is_empty() {
        return Err(AppError::Internal("whatsapp number is not configured".to_string()));
    }

    let Some(whatsapp_url) = whatsapp::order_link(&settings.whatsapp, cart.items()) else {
        // Empty cart: no message, no navigation, state untouched.
        return Ok((
            StatusCode::OK,
            Json(CheckoutResponse {
                whatsapp_url: None,
                cart: cart.summary(),
            }),
        )
            .into_response());
    };

    cart.clear();
    cart.set_open(false);
    save_cart(&session, &cart).await;

    Ok((
        StatusCode::OK,
        Json(CheckoutResponse {
            whatsapp_url: Some(whatsapp_url),
            cart: cart.summary(),
        }),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use oli_poli_core::{CategoryId, Product};
    use rust_decimal::Decimal;
    use tower_sessions::{MemoryStore, Session};

    use super::*;

    fn product(id: &str, name: &str, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            category: CategoryId::new("brinquedos"),
            description: String::new(),
            price: price.parse().expect("valid decimal"),
            image_url: None,
            emoji: None,
            stock: 10,
            featured: false,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_cart_slot_survives_a_session_reload() {
        let store = Arc::new(MemoryStore::default());

        let session = Session::new(None, store.clone(), None);
        let mut cart = load_cart(&session).await;
        assert!(cart.is_empty(), "fresh session starts empty");

        cart.add_item(&product("cofrinho-unicornio", "Cofrinho Unicórnio", "29.90"), 2);
        cart.add_item(&product("bolha-de-sabao", "Bolha de Sabão", "9.50"), 1);
        save_cart(&session, &cart).await;
        session.save().await.expect("session persists");

        // A new Session over the same store is a fresh request after reload.
        let id = session.id().expect("id assigned on save");
        let reloaded = Session::new(Some(id), store, None);
        let cart = load_cart(&reloaded).await;

        assert_eq!(cart.count(), 3);
        assert_eq!(cart.items().len(), 2);
        assert_eq!(
            cart.total(),
            "69.30".parse::<Decimal>().expect("valid decimal")
        );
    }

    #[tokio::test]
    async fn test_unknown_session_loads_as_empty_cart() {
        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);
        let cart = load_cart(&session).await;
        assert!(cart.is_empty());
    }
}
