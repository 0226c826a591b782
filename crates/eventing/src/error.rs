//! Eventing error types.

use thiserror::Error;

/// Errors that can occur while publishing events.
#[derive(Debug, Error)]
pub enum EventingError {
    /// The broker rejected the envelope or could not be reached.
    ///
    /// On the producer side this leaves an already-committed order in
    /// `order_created` until remediated; on the worker's completion
    /// publish it fails the invocation so broker redelivery governs
    /// recovery.
    #[error("broker unavailable: {0}")]
    BrokerUnavailable(String),

    /// Envelope serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
