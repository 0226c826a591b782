//! Order store error types.

use common::OrderId;
use domain::OrderStatus;
use thiserror::Error;

/// Errors that can occur during order store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No order exists with the given ID.
    #[error("order not found: {0}")]
    NotFound(OrderId),

    /// The store generated an ID that already exists.
    #[error("order id already exists: {0}")]
    DuplicateId(OrderId),

    /// A conditional status update found a different status than expected.
    ///
    /// This is how the store refuses to regress a terminal order: the
    /// caller asked to transition from `expected` but the record was
    /// already at `actual`.
    #[error("status conflict on order {order_id}: expected {expected}, actual {actual}")]
    StatusConflict {
        order_id: OrderId,
        expected: OrderStatus,
        actual: OrderStatus,
    },

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience type alias for store results.
pub type Result<T> = std::result::Result<T, StoreError>;
