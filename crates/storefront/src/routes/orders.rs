//! Public order submission.

use axum::{Json, extract::State, http::StatusCode};
use chrono::NaiveDate;
use oli_poli_core::{LineItem, Order, OrderId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Order submission request body.
///
/// `items` is the client's cart snapshot; the total is recomputed
/// server-side from it.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub items: Vec<LineItem>,
    pub delivery_date: Option<NaiveDate>,
    pub observations: Option<String>,
}

/// Order submission response body.
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub id: OrderId,
    pub success: bool,
}

/// Validate a submission before it touches the database.
fn validate(body: &CreateOrderRequest) -> Result<()> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    if body.phone.trim().is_empty() {
        return Err(AppError::BadRequest("phone is required".to_string()));
    }
    if body.address.trim().is_empty() {
        return Err(AppError::BadRequest("address is required".to_string()));
    }
    if body.items.is_empty() {
        return Err(AppError::BadRequest("order has no items".to_string()));
    }
    for item in &body.items {
        if item.quantity < 1 {
            return Err(AppError::BadRequest(format!(
                "item {} has quantity below 1",
                item.id
            )));
        }
        if item.price < Decimal::ZERO {
            return Err(AppError::BadRequest(format!(
                "item {} has a negative price",
                item.id
            )));
        }
    }
    Ok(())
}

/// Create a pending order. `POST /api/orders`.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<CreateOrderResponse>)> {
    validate(&body)?;

    let order = Order::new(
        body.name.trim().to_string(),
        body.phone.trim().to_string(),
        body.address.trim().to_string(),
        body.items,
        body.delivery_date,
        body.observations,
    );

    OrderRepository::new(state.pool()).create(&order).await?;
    tracing::info!(order_id = %order.id, total = %order.total, "order created");

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            id: order.id,
            success: true,
        }),
    ))
}

#[cfg(test)]
mod tests {
    use oli_poli_core::ProductId;

    use super::*;

    fn request() -> CreateOrderRequest {
        CreateOrderRequest {
            name: "Maria".to_string(),
            phone: "(11) 98765-4321".to_string(),
            address: "Rua das Flores, 123".to_string(),
            items: vec![LineItem {
                id: ProductId::new("a"),
                name: "Cofrinho Unicórnio".to_string(),
                price: "29.90".parse().expect("decimal"),
                quantity: 2,
                image_url: None,
                emoji: None,
            }],
            delivery_date: None,
            observations: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate(&request()).is_ok());
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        let mut body = request();
        body.name = "   ".to_string();
        assert!(matches!(validate(&body), Err(AppError::BadRequest(_))));

        let mut body = request();
        body.address = String::new();
        assert!(matches!(validate(&body), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_empty_items_are_rejected() {
        let mut body = request();
        body.items.clear();
        assert!(matches!(validate(&body), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_invalid_items_are_rejected() {
        let mut body = request();
        body.items[0].quantity = 0;
        assert!(matches!(validate(&body), Err(AppError::BadRequest(_))));

        let mut body = request();
        body.items[0].price = "-1".parse().expect("decimal");
        assert!(matches!(validate(&body), Err(AppError::BadRequest(_))));
    }
}
