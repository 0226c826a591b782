//! Order lookup endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use common::OrderId;
use order_store::OrderStore;
use serde::Serialize;

use crate::error::ApiError;
use crate::routes::checkout::AppState;

#[derive(Serialize)]
pub struct ShippingResponse {
    pub address_1: String,
    pub address_2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub email: String,
    pub mobile: String,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub user_id: String,
    pub status: String,
    pub amount_cents: i64,
    pub items: Vec<String>,
    pub shipping: ShippingResponse,
}

/// GET /orders/{id} — load an order by ID.
#[tracing::instrument(skip(state))]
pub async fn get<R: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id: OrderId = uuid::Uuid::parse_str(&id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid order id: {e}")))?
        .into();

    let order = state
        .store
        .get(order_id)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .ok_or_else(|| ApiError::NotFound(format!("Order {id} not found")))?;

    Ok(Json(OrderResponse {
        id: order.id.to_string(),
        user_id: order.user_id.to_string(),
        status: order.status.to_string(),
        amount_cents: order.amount.cents(),
        items: order.items.iter().map(ToString::to_string).collect(),
        shipping: ShippingResponse {
            address_1: order.shipping.address_1,
            address_2: order.shipping.address_2,
            city: order.shipping.city,
            state: order.shipping.state,
            zip_code: order.shipping.zip_code,
            email: order.shipping.email,
            mobile: order.shipping.mobile,
        },
    }))
}
