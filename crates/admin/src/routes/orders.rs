//! Order management endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDate;
use oli_poli_core::{Order, OrderId, OrderStatus};
use serde::Deserialize;
use tracing::instrument;

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::routes::products::MutationResponse;
use crate::state::AppState;

/// Status transition request body. An unknown status fails JSON
/// deserialization before the handler runs.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
}

/// Delivery details request body. Both fields are written as given, so
/// omitting one clears it.
#[derive(Debug, Deserialize)]
pub struct UpdateDetailsRequest {
    pub delivery_date: Option<NaiveDate>,
    pub observations: Option<String>,
}

/// List all orders, newest first. `GET /api/orders`.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool()).list().await?;
    Ok(Json(orders))
}

/// Get one order. `GET /api/orders/{id}`.
#[instrument(skip(state))]
pub async fn get(State(state): State<AppState>, Path(id): Path<OrderId>) -> Result<Json<Order>> {
    let order = OrderRepository::new(state.pool())
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;
    Ok(Json(order))
}

/// Update an order's status. `PATCH /api/orders/{id}/status`.
#[instrument(skip(state))]
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<MutationResponse>> {
    let updated = OrderRepository::new(state.pool())
        .update_status(&id, body.status)
        .await?;
    if !updated {
        return Err(AppError::NotFound(format!("order {id}")));
    }
    tracing::info!(order_id = %id, status = %body.status, "order status updated");
    Ok(Json(MutationResponse { success: true }))
}

/// Update an order's delivery date and observations.
/// `PATCH /api/orders/{id}`.
#[instrument(skip(state, body))]
pub async fn update_details(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(body): Json<UpdateDetailsRequest>,
) -> Result<Json<MutationResponse>> {
    let updated = OrderRepository::new(state.pool())
        .update_details(&id, body.delivery_date, body.observations.as_deref())
        .await?;
    if !updated {
        return Err(AppError::NotFound(format!("order {id}")));
    }
    tracing::info!(order_id = %id, "order details updated");
    Ok(Json(MutationResponse { success: true }))
}

/// Delete an order. `DELETE /api/orders/{id}`.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<MutationResponse>> {
    let deleted = OrderRepository::new(state.pool()).delete(&id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!("order {id}")));
    }
    tracing::info!(order_id = %id, "order deleted");
    Ok(Json(MutationResponse { success: true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_request_parses_kebab_case() {
        let body: UpdateStatusRequest =
            serde_json::from_str(r#"{"status":"out-for-delivery"}"#).expect("parse");
        assert_eq!(body.status, OrderStatus::OutForDelivery);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result = serde_json::from_str::<UpdateStatusRequest>(r#"{"status":"shipped"}"#);
        assert!(result.is_err());
    }
}
