//! Event envelope wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::carrier::TraceCarrier;

/// Business event types published by the checkout pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// A checkout persisted an order and requested payment.
    OrderCreated,

    /// The settlement worker charged the order successfully.
    PaymentProcessed,

    /// The settlement worker could not charge the order.
    PaymentFailed,
}

impl EventType {
    /// Returns the wire name of the event type.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::OrderCreated => "order_created",
            EventType::PaymentProcessed => "payment_processed",
            EventType::PaymentFailed => "payment_failed",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The wrapper transmitted over the broker for every business event.
///
/// Immutable once constructed; envelopes are transmitted, never stored.
/// Every envelope carries a carrier map — empty at minimum — so consumers
/// can uniformly attempt trace continuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// The kind of business event.
    pub event_type: EventType,

    /// Producer-clock timestamp taken when the envelope was built.
    pub created_time: DateTime<Utc>,

    /// Event-type-specific payload.
    pub event_context: serde_json::Value,

    /// Trace-context carrier; defaults to empty when absent on the wire.
    #[serde(default)]
    pub carrier: TraceCarrier,
}

impl EventEnvelope {
    /// Creates an envelope stamped with the current producer time.
    pub fn new(event_type: EventType, event_context: serde_json::Value, carrier: TraceCarrier) -> Self {
        Self {
            event_type,
            created_time: Utc::now(),
            event_context,
            carrier,
        }
    }

    /// Serializes the envelope to JSON for the broker.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes an envelope from a broker payload.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
