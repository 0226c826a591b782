use async_trait::async_trait;
use common::OrderId;
use domain::{Order, OrderDraft, OrderStatus};

use crate::Result;

/// Core trait for order store implementations.
///
/// All implementations must be thread-safe (Send + Sync). Individual
/// writes are atomic from the reader's perspective: a concurrent `get`
/// never observes a half-written record.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order, assigning it a fresh globally-unique ID.
    ///
    /// IDs are generated here, never supplied by callers, so an existing
    /// record can never be silently overwritten. Returns the assigned ID.
    async fn create(&self, draft: OrderDraft) -> Result<OrderId>;

    /// Point lookup by order ID.
    ///
    /// Returns `Ok(None)` if no order exists with the given ID.
    async fn get(&self, order_id: OrderId) -> Result<Option<Order>>;

    /// Overwrites the full order record, conditional on its current status.
    ///
    /// `order` carries the new status; the write only happens if the
    /// stored status still equals `expected`. Fails with
    /// [`StoreError::StatusConflict`](crate::StoreError::StatusConflict)
    /// otherwise, so a redelivered settlement cannot re-drive an order
    /// that another invocation already settled.
    async fn update_status(
        &self,
        order_id: OrderId,
        expected: OrderStatus,
        order: &Order,
    ) -> Result<()>;
}
