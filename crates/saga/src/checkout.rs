//! Checkout/charge initiator (producer side of the saga).

use common::{OrderId, UserId};
use domain::{CheckoutForm, Money, OrderDraft};
use eventing::{EventEnvelope, EventPublisher, EventType, TraceCarrier};
use order_store::OrderStore;

use crate::error::CheckoutError;
use crate::events::OrderCreatedContext;
use crate::services::catalog::CatalogService;

/// Confirmation returned to the buyer once the order is persisted.
///
/// Returned whether or not a payment event was published: a tokenless
/// checkout is the valid "pay later" path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReceipt {
    pub order_id: OrderId,
    pub amount: Money,
}

/// Validates checkout input, persists the order, and kicks off payment.
///
/// The order write always commits before the publish is attempted, so an
/// `order_created` event can never reference an order that does not
/// exist. The reverse failure — committed order, failed publish — is the
/// accepted inconsistency window and surfaces as an error to the caller.
pub struct CheckoutService<R, C, P> {
    store: R,
    catalog: C,
    publisher: P,
    payment_topic: String,
}

impl<R, C, P> CheckoutService<R, C, P>
where
    R: OrderStore,
    C: CatalogService,
    P: EventPublisher,
{
    /// Creates a new checkout service publishing to the given topic.
    pub fn new(store: R, catalog: C, publisher: P, payment_topic: impl Into<String>) -> Self {
        Self {
            store,
            catalog,
            publisher,
            payment_topic: payment_topic.into(),
        }
    }

    /// Processes one checkout as a single logical unit.
    ///
    /// 1. Validate the form.
    /// 2. Sum current catalog prices for the requested products.
    /// 3. Persist the order with status `order_created`.
    /// 4. If a payment token is present, publish an `order_created`
    ///    envelope carrying the request's trace context.
    #[tracing::instrument(skip(self, form), fields(user_id = %user_id))]
    pub async fn process(
        &self,
        user_id: UserId,
        form: CheckoutForm,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        metrics::counter!("checkout_requests_total").increment(1);

        form.validate()?;

        let mut amount = Money::zero();
        for product_id in &form.product_ids {
            amount += self.catalog.get_price(product_id).await?;
        }

        let draft = OrderDraft::new(user_id, amount, form.shipping(), form.product_ids.clone());
        let order_id = self.store.create(draft).await?;
        tracing::info!(%order_id, amount = %amount, "order created");

        if let Some(token) = form.token {
            let carrier = TraceCarrier::inject_current().with_user_id(user_id);
            let context = OrderCreatedContext { order_id, token };
            let envelope = EventEnvelope::new(
                EventType::OrderCreated,
                serde_json::to_value(&context)?,
                carrier,
            );

            self.publisher.publish(&self.payment_topic, envelope).await?;
            metrics::counter!("checkout_payment_events_total").increment(1);
            tracing::info!(%order_id, topic = %self.payment_topic, "payment event published");
        } else {
            tracing::info!(%order_id, "no payment token, order awaiting payment");
        }

        Ok(CheckoutReceipt { order_id, amount })
    }
}
