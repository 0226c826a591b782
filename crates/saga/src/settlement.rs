//! Payment settlement worker (consumer side of the saga).

use domain::OrderStatus;
use eventing::{EventEnvelope, EventPublisher, EventType, TraceCarrier};
use order_store::{OrderStore, StoreError};
use tracing::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::CURRENCY_USD;
use crate::error::SettlementError;
use crate::events::{OrderCreatedContext, PaymentCompletionContext};
use crate::services::payment::PaymentProvider;

/// What a settlement invocation did with the delivered event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementOutcome {
    /// The order was charged (or the charge failed) and moved to the
    /// given terminal status; a completion event was published.
    Settled(OrderStatus),

    /// The order was already terminal — a duplicate delivery or a lost
    /// race against a concurrent invocation. No charge was attempted and
    /// nothing was published.
    AlreadySettled(OrderStatus),
}

/// Consumes `order_created` envelopes and settles payment for each.
///
/// Invocations are re-entrant: the broker may redeliver an envelope or
/// overlap two deliveries for the same order. The worker reads current
/// state before charging and relies on the store's conditional status
/// update to guarantee at most one business effect per order.
pub struct SettlementWorker<R, P, E> {
    store: R,
    provider: P,
    publisher: E,
    completion_topic: String,
}

impl<R, P, E> SettlementWorker<R, P, E>
where
    R: OrderStore,
    P: PaymentProvider,
    E: EventPublisher,
{
    /// Creates a new settlement worker publishing completions to the
    /// given topic.
    pub fn new(store: R, provider: P, publisher: E, completion_topic: impl Into<String>) -> Self {
        Self {
            store,
            provider,
            publisher,
            completion_topic: completion_topic.into(),
        }
    }

    /// Handles one delivered envelope.
    ///
    /// The invocation span is parented on the envelope's carrier so the
    /// consumer's work is attributed to the originating checkout trace.
    /// A charge-provider error is an expected outcome and resolves to
    /// `payment_failed`; only store and broker faults return `Err`.
    pub async fn handle(
        &self,
        envelope: EventEnvelope,
    ) -> Result<SettlementOutcome, SettlementError> {
        metrics::counter!("settlement_invocations_total").increment(1);

        let parent_cx = envelope.carrier.extract();
        let span = tracing::info_span!(
            "settle_payment",
            user_id = envelope.carrier.user_id().unwrap_or("unknown")
        );
        span.set_parent(parent_cx);

        self.settle(envelope).instrument(span).await
    }

    async fn settle(
        &self,
        envelope: EventEnvelope,
    ) -> Result<SettlementOutcome, SettlementError> {
        let context: OrderCreatedContext = serde_json::from_value(envelope.event_context)?;
        let order_id = context.order_id;

        let order = self
            .store
            .get(order_id)
            .await?
            .ok_or(SettlementError::OrderNotFound(order_id))?;

        // Idempotency guard: a redelivered event for a settled order must
        // not reach the provider again.
        if order.status.is_terminal() {
            tracing::info!(%order_id, status = %order.status, "order already settled, skipping");
            metrics::counter!("settlement_duplicate_deliveries_total").increment(1);
            return Ok(SettlementOutcome::AlreadySettled(order.status));
        }

        // The amount was fixed at order creation; it is never recomputed here.
        let status = match self
            .provider
            .charge(order.amount, CURRENCY_USD, &context.token)
            .await
        {
            Ok(receipt) => {
                tracing::info!(%order_id, charge_id = %receipt.charge_id, "charge succeeded");
                OrderStatus::PaymentProcessed
            }
            Err(err) => {
                tracing::warn!(%order_id, error = %err, "charge failed");
                metrics::counter!("settlement_charge_failures_total").increment(1);
                OrderStatus::PaymentFailed
            }
        };

        let settled = order.with_status(status);
        match self
            .store
            .update_status(order_id, OrderStatus::OrderCreated, &settled)
            .await
        {
            Ok(()) => {
                tracing::info!(%order_id, status = %status, "order status updated");
            }
            Err(StoreError::StatusConflict { actual, .. }) => {
                // A concurrent invocation settled first; its completion
                // event stands and this one must not publish a second.
                tracing::warn!(%order_id, status = %actual, "lost settlement race");
                metrics::counter!("settlement_duplicate_deliveries_total").increment(1);
                return Ok(SettlementOutcome::AlreadySettled(actual));
            }
            Err(err) => return Err(err.into()),
        }

        let event_type = match status {
            OrderStatus::PaymentProcessed => EventType::PaymentProcessed,
            _ => EventType::PaymentFailed,
        };
        let carrier = TraceCarrier::inject_current().with_user_id(settled.user_id);
        let completion = PaymentCompletionContext {
            order_id,
            email: settled.shipping.email.clone(),
            order: settled,
        };
        let envelope = EventEnvelope::new(
            event_type,
            serde_json::to_value(&completion)?,
            carrier,
        );

        self.publisher
            .publish(&self.completion_topic, envelope)
            .await?;
        tracing::info!(%order_id, topic = %self.completion_topic, event_type = %event_type, "completion event published");

        Ok(SettlementOutcome::Settled(status))
    }
}
