//! Saga error types.

use common::OrderId;
use domain::{ProductId, ValidationError};
use eventing::EventingError;
use order_store::StoreError;
use thiserror::Error;

/// Errors that can occur on the checkout (producer) side.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The checkout form failed validation; nothing was written.
    #[error("invalid checkout input: {0}")]
    Validation(#[from] ValidationError),

    /// The catalog has no price for a requested product.
    #[error("no catalog price for product: {0}")]
    PriceNotFound(ProductId),

    /// The order write failed; no event was published.
    #[error("order store error: {0}")]
    Store(#[from] StoreError),

    /// The order committed but the event publish failed, leaving the
    /// order in `order_created` until remediated.
    #[error("event publish error: {0}")]
    Publish(#[from] EventingError),

    /// Event payload serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors that fail a settlement invocation.
///
/// A provider charge error is deliberately absent here: a declined or
/// failed charge is an expected business outcome that resolves the saga
/// to `payment_failed`, not an invocation failure. These variants are
/// operational faults, left to the broker's redelivery policy.
#[derive(Debug, Error)]
pub enum SettlementError {
    /// The envelope payload could not be decoded.
    #[error("envelope decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The order referenced by the event does not exist.
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    /// The status update failed.
    #[error("order store error: {0}")]
    Store(#[from] StoreError),

    /// The completion publish failed after the status update committed.
    #[error("completion publish error: {0}")]
    Publish(#[from] EventingError),
}
