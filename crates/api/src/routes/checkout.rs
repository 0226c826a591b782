//! Checkout endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use common::UserId;
use domain::{CheckoutForm, ProductId};
use eventing::InMemoryBroker;
use order_store::OrderStore;
use saga::{CheckoutService, InMemoryCatalog};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<R: OrderStore> {
    pub checkout: CheckoutService<R, InMemoryCatalog, InMemoryBroker>,
    pub store: R,
    pub catalog: InMemoryCatalog,
    pub broker: InMemoryBroker,
}

#[derive(Deserialize)]
pub struct CheckoutRequest {
    /// Acting user; a fresh ID is minted for anonymous checkouts.
    pub user_id: Option<String>,
    pub product_ids: Vec<String>,
    pub address_1: String,
    pub address_2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub email: String,
    pub mobile: String,
    pub token: Option<String>,
}

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub order_id: String,
    pub amount_cents: i64,
    pub status: String,
}

/// POST /checkout — create an order and kick off payment settlement.
#[tracing::instrument(skip(state, req))]
pub async fn process<R: OrderStore + Clone + 'static>(
    State(state): State<Arc<AppState<R>>>,
    Json(req): Json<CheckoutRequest>,
) -> Result<(axum::http::StatusCode, Json<CheckoutResponse>), ApiError> {
    let user_id = if let Some(ref id_str) = req.user_id {
        let uuid = uuid::Uuid::parse_str(id_str)
            .map_err(|e| ApiError::BadRequest(format!("Invalid user_id: {e}")))?;
        UserId::from_uuid(uuid)
    } else {
        UserId::new()
    };

    let form = CheckoutForm {
        product_ids: req.product_ids.into_iter().map(ProductId::new).collect(),
        address_1: req.address_1,
        address_2: req.address_2,
        city: req.city,
        state: req.state,
        zip_code: req.zip_code,
        email: req.email,
        mobile: req.mobile,
        token: req.token,
    };

    let receipt = state.checkout.process(user_id, form).await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(CheckoutResponse {
            order_id: receipt.order_id.to_string(),
            amount_cents: receipt.amount.cents(),
            status: "order_created".to_string(),
        }),
    ))
}
