//! Serializable trace-context carrier.

use std::collections::HashMap;

use common::UserId;
use opentelemetry::Context;
use opentelemetry::propagation::{Extractor, Injector, TextMapPropagator};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use serde::{Deserialize, Serialize};
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Application key carried alongside the W3C trace-context entries so the
/// consumer can attribute work to the acting user.
pub const USER_ID_KEY: &str = "user_id";

/// Opaque string map carrying the producer's trace context across the broker.
///
/// The producer injects its span identifiers using the W3C trace-context
/// format (`traceparent`/`tracestate`); the consumer extracts them to
/// parent its own spans on the originating checkout trace. The broker
/// never looks inside — the carrier is just application data riding in
/// the envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceCarrier(HashMap<String, String>);

impl TraceCarrier {
    /// Creates an empty carrier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes the given context's span identifiers into a carrier.
    pub fn inject(cx: &Context) -> Self {
        let mut carrier = Self::new();
        TraceContextPropagator::new().inject_context(cx, &mut carrier);
        carrier
    }

    /// Serializes the current tracing span's context into a carrier.
    ///
    /// If no OpenTelemetry layer is installed (or the current span is
    /// unsampled and invalid) the carrier comes back empty, which the
    /// consumer side tolerates.
    pub fn inject_current() -> Self {
        Self::inject(&tracing::Span::current().context())
    }

    /// Adds the acting user ID as an application attribution key.
    pub fn with_user_id(mut self, user_id: UserId) -> Self {
        self.0.insert(USER_ID_KEY.to_string(), user_id.to_string());
        self
    }

    /// Reconstructs a trace context from the carrier.
    ///
    /// A missing or malformed `traceparent` entry yields a fresh,
    /// unlinked context rather than an error, so a bad carrier can never
    /// fail the consumer.
    pub fn extract(&self) -> Context {
        TraceContextPropagator::new().extract(self)
    }

    /// Returns the attributed user ID, if present.
    pub fn user_id(&self) -> Option<&str> {
        self.0.get(USER_ID_KEY).map(String::as_str)
    }

    /// Returns the value for an arbitrary carrier key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns true if the carrier holds no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Injector for TraceCarrier {
    fn set(&mut self, key: &str, value: String) {
        self.0.insert(key.to_string(), value);
    }
}

impl Extractor for TraceCarrier {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use opentelemetry::trace::{
        SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
    };

    use super::*;

    fn remote_context() -> Context {
        let span_context = SpanContext::new(
            TraceId::from_hex("4bf92f3577b34da6a3ce929d0e0e4736").unwrap(),
            SpanId::from_hex("00f067aa0ba902b7").unwrap(),
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );
        Context::new().with_remote_span_context(span_context)
    }

    #[test]
    fn test_inject_writes_traceparent() {
        let carrier = TraceCarrier::inject(&remote_context());
        let traceparent = carrier.get("traceparent").unwrap();
        assert!(traceparent.contains("4bf92f3577b34da6a3ce929d0e0e4736"));
        assert!(traceparent.contains("00f067aa0ba902b7"));
    }

    #[test]
    fn test_extract_links_back_to_producer_trace() {
        let cx = remote_context();
        let carrier = TraceCarrier::inject(&cx);

        let extracted = carrier.extract();
        let span_context = extracted.span().span_context().clone();

        assert!(span_context.is_valid());
        assert_eq!(
            span_context.trace_id(),
            cx.span().span_context().trace_id()
        );
        assert!(span_context.is_remote());
    }

    #[test]
    fn test_extract_empty_carrier_yields_unlinked_context() {
        let extracted = TraceCarrier::new().extract();
        assert!(!extracted.span().span_context().is_valid());
    }

    #[test]
    fn test_extract_malformed_carrier_does_not_fail() {
        let mut carrier = TraceCarrier::new();
        Injector::set(&mut carrier, "traceparent", "garbage-not-a-traceparent".to_string());

        let extracted = carrier.extract();
        assert!(!extracted.span().span_context().is_valid());
    }

    #[test]
    fn test_user_id_key_survives_serialization() {
        let user_id = UserId::new();
        let carrier = TraceCarrier::inject(&remote_context()).with_user_id(user_id);

        let json = serde_json::to_string(&carrier).unwrap();
        let decoded: TraceCarrier = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded.user_id(), Some(user_id.to_string().as_str()));
        assert_eq!(decoded, carrier);
    }

    #[test]
    fn test_serializes_as_flat_string_map() {
        let carrier = TraceCarrier::inject(&remote_context());
        let value = serde_json::to_value(&carrier).unwrap();
        assert!(value.is_object());
        assert!(value["traceparent"].is_string());
    }
}
