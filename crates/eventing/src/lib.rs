//! Event envelope, broker publishing, and trace-context propagation.
//!
//! The checkout producer and the settlement worker run in separate
//! processes and share nothing but JSON envelopes on broker topics. This
//! crate defines that contract: the [`EventEnvelope`] wire format, the
//! [`EventPublisher`] trait with at-least-once semantics, and the
//! [`TraceCarrier`] that rides inside every envelope so the consumer can
//! resume the producer's distributed trace.

pub mod carrier;
pub mod envelope;
pub mod error;
pub mod publisher;

pub use carrier::{TraceCarrier, USER_ID_KEY};
pub use envelope::{EventEnvelope, EventType};
pub use error::EventingError;
pub use publisher::{EventPublisher, InMemoryBroker};
