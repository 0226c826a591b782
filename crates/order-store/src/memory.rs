use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use async_trait::async_trait;
use common::OrderId;
use domain::{Order, OrderDraft, OrderStatus};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::{Result, store::OrderStore};

/// In-memory order store implementation.
///
/// Backs local runs and tests with the same interface as the PostgreSQL
/// implementation. Each operation takes the lock once, so writes are
/// atomic with respect to concurrent readers.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty in-memory order store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of orders stored.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Clears all orders.
    pub async fn clear(&self) {
        self.orders.write().await.clear();
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn create(&self, draft: OrderDraft) -> Result<OrderId> {
        let id = OrderId::new();
        let order = draft.into_order(id);

        let mut orders = self.orders.write().await;
        match orders.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(order);
                Ok(id)
            }
            Entry::Occupied(_) => Err(StoreError::DuplicateId(id)),
        }
    }

    async fn get(&self, order_id: OrderId) -> Result<Option<Order>> {
        Ok(self.orders.read().await.get(&order_id).cloned())
    }

    async fn update_status(
        &self,
        order_id: OrderId,
        expected: OrderStatus,
        order: &Order,
    ) -> Result<()> {
        let mut orders = self.orders.write().await;
        let current = orders
            .get(&order_id)
            .ok_or(StoreError::NotFound(order_id))?;

        if current.status != expected {
            return Err(StoreError::StatusConflict {
                order_id,
                expected,
                actual: current.status,
            });
        }

        orders.insert(order_id, order.clone());
        Ok(())
    }
}
