//! Event publisher trait and in-memory broker.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::envelope::EventEnvelope;
use crate::error::EventingError;

/// Trait for publishing event envelopes to a broker topic.
///
/// Delivery is at-least-once and asynchronous relative to the caller:
/// `publish` returns once the broker has accepted the envelope, not once
/// any consumer has processed it. No ordering is guaranteed between
/// topics; same-topic ordering from one producer is best-effort and not
/// relied upon.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Hands an envelope to the broker for the given topic.
    async fn publish(&self, topic: &str, envelope: EventEnvelope) -> Result<(), EventingError>;
}

#[derive(Default)]
struct BrokerState {
    published: HashMap<String, Vec<EventEnvelope>>,
    subscribers: HashMap<String, Vec<mpsc::UnboundedSender<EventEnvelope>>>,
    fail_publish: bool,
}

/// In-memory broker for local runs and tests.
///
/// Keeps a log of everything published per topic and forwards each
/// envelope to any live subscribers. `set_fail_publish` simulates an
/// unreachable broker.
#[derive(Clone, Default)]
pub struct InMemoryBroker {
    state: Arc<RwLock<BrokerState>>,
}

impl InMemoryBroker {
    /// Creates a new in-memory broker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to a topic, receiving every envelope published after
    /// this call.
    pub fn subscribe(&self, topic: &str) -> mpsc::UnboundedReceiver<EventEnvelope> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.state
            .write()
            .unwrap()
            .subscribers
            .entry(topic.to_string())
            .or_default()
            .push(tx);
        rx
    }

    /// Configures the broker to reject all publishes.
    pub fn set_fail_publish(&self, fail: bool) {
        self.state.write().unwrap().fail_publish = fail;
    }

    /// Returns the envelopes published to a topic so far.
    pub fn published(&self, topic: &str) -> Vec<EventEnvelope> {
        self.state
            .read()
            .unwrap()
            .published
            .get(topic)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the number of envelopes published to a topic.
    pub fn publish_count(&self, topic: &str) -> usize {
        self.state
            .read()
            .unwrap()
            .published
            .get(topic)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl EventPublisher for InMemoryBroker {
    async fn publish(&self, topic: &str, envelope: EventEnvelope) -> Result<(), EventingError> {
        let mut state = self.state.write().unwrap();

        if state.fail_publish {
            return Err(EventingError::BrokerUnavailable(format!(
                "publish to topic '{topic}' rejected"
            )));
        }

        tracing::debug!(topic, event_type = %envelope.event_type, "envelope accepted");

        if let Some(senders) = state.subscribers.get_mut(topic) {
            // Drop subscribers whose receivers have gone away.
            senders.retain(|tx| tx.send(envelope.clone()).is_ok());
        }

        state
            .published
            .entry(topic.to_string())
            .or_default()
            .push(envelope);

        Ok(())
    }
}
