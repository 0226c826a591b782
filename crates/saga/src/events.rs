//! Typed payloads for the saga's event envelopes.

use common::OrderId;
use domain::Order;
use serde::{Deserialize, Serialize};

/// Payload of an `order_created` envelope on the payment-process topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreatedContext {
    /// The order awaiting settlement.
    pub order_id: OrderId,

    /// Payment authorization token collected at checkout.
    pub token: String,
}

/// Payload of a completion envelope on the payment-completion topic.
///
/// Carries the full order record so downstream consumers (confirmation
/// mail, analytics) need no further lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentCompletionContext {
    pub order_id: OrderId,
    pub email: String,
    pub order: Order,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_created_context_roundtrip() {
        let ctx = OrderCreatedContext {
            order_id: OrderId::new(),
            token: "tok_123".to_string(),
        };

        let value = serde_json::to_value(&ctx).unwrap();
        assert_eq!(value["token"], "tok_123");

        let decoded: OrderCreatedContext = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, ctx);
    }
}
