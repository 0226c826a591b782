//! Order status state machine.

use serde::{Deserialize, Serialize};

/// The status of an order in its payment lifecycle.
///
/// Status transitions:
/// ```text
/// OrderCreated ──┬──► PaymentProcessed
///                └──► PaymentFailed
/// ```
///
/// Both `PaymentProcessed` and `PaymentFailed` are terminal: no transition
/// is defined out of them, and a redelivered settlement event must never
/// re-drive an order that has already reached one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order has been persisted; payment has not been settled yet.
    #[default]
    OrderCreated,

    /// The charge succeeded (terminal).
    PaymentProcessed,

    /// The charge was declined or the provider errored (terminal).
    PaymentFailed,
}

impl OrderStatus {
    /// Returns true if this is a terminal status (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::PaymentProcessed | OrderStatus::PaymentFailed
        )
    }

    /// Returns true if a settlement attempt is allowed from this status.
    pub fn can_settle(&self) -> bool {
        matches!(self, OrderStatus::OrderCreated)
    }

    /// Returns the wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::OrderCreated => "order_created",
            OrderStatus::PaymentProcessed => "payment_processed",
            OrderStatus::PaymentFailed => "payment_failed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "order_created" => Ok(OrderStatus::OrderCreated),
            "payment_processed" => Ok(OrderStatus::PaymentProcessed),
            "payment_failed" => Ok(OrderStatus::PaymentFailed),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_order_created() {
        assert_eq!(OrderStatus::default(), OrderStatus::OrderCreated);
    }

    #[test]
    fn test_only_order_created_can_settle() {
        assert!(OrderStatus::OrderCreated.can_settle());
        assert!(!OrderStatus::PaymentProcessed.can_settle());
        assert!(!OrderStatus::PaymentFailed.can_settle());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!OrderStatus::OrderCreated.is_terminal());
        assert!(OrderStatus::PaymentProcessed.is_terminal());
        assert!(OrderStatus::PaymentFailed.is_terminal());
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(OrderStatus::OrderCreated.to_string(), "order_created");
        assert_eq!(
            OrderStatus::PaymentProcessed.to_string(),
            "payment_processed"
        );
        assert_eq!(OrderStatus::PaymentFailed.to_string(), "payment_failed");
    }

    #[test]
    fn test_parses_wire_names() {
        assert_eq!(
            "payment_failed".parse::<OrderStatus>().unwrap(),
            OrderStatus::PaymentFailed
        );
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_serializes_to_snake_case() {
        let json = serde_json::to_string(&OrderStatus::PaymentProcessed).unwrap();
        assert_eq!(json, "\"payment_processed\"");

        let status: OrderStatus = serde_json::from_str("\"order_created\"").unwrap();
        assert_eq!(status, OrderStatus::OrderCreated);
    }
}
