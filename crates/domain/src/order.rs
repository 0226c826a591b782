//! The order record and its embedded shipping information.

use common::{OrderId, UserId};
use serde::{Deserialize, Serialize};

use crate::status::OrderStatus;
use crate::value_objects::{Money, ProductId};

/// Shipping address and contact details embedded in an order.
///
/// Immutable once embedded: the settlement worker reads the contact
/// email from here but never rewrites shipping fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipping {
    pub address_1: String,
    pub address_2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub email: String,
    pub mobile: String,
}

/// A persisted order.
///
/// The amount is fixed at creation time from catalog prices and is never
/// recomputed by the settlement worker. The status moves along the
/// [`OrderStatus`] state machine and only the worker mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Store-assigned identifier, never reused.
    pub id: OrderId,

    /// The user who placed the order.
    pub user_id: UserId,

    /// Total price in cents, summed from catalog prices at checkout time.
    pub amount: Money,

    /// Shipping address and contact details.
    pub shipping: Shipping,

    /// Current position in the payment lifecycle.
    pub status: OrderStatus,

    /// Ordered list of purchased product IDs.
    pub items: Vec<ProductId>,
}

impl Order {
    /// Returns a copy of this order with the given status.
    pub fn with_status(&self, status: OrderStatus) -> Order {
        Order {
            status,
            ..self.clone()
        }
    }
}

/// An order that has not been persisted yet.
///
/// The order store assigns the ID at creation time; callers cannot pick
/// or reuse IDs, so the draft carries everything but the identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub user_id: UserId,
    pub amount: Money,
    pub shipping: Shipping,
    pub status: OrderStatus,
    pub items: Vec<ProductId>,
}

impl OrderDraft {
    /// Creates a draft in the initial `order_created` status.
    pub fn new(user_id: UserId, amount: Money, shipping: Shipping, items: Vec<ProductId>) -> Self {
        Self {
            user_id,
            amount,
            shipping,
            status: OrderStatus::OrderCreated,
            items,
        }
    }

    /// Attaches a store-assigned ID, producing the persisted record.
    pub fn into_order(self, id: OrderId) -> Order {
        Order {
            id,
            user_id: self.user_id,
            amount: self.amount,
            shipping: self.shipping,
            status: self.status,
            items: self.items,
        }
    }
}
