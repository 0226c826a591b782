//! Checkout-to-payment saga.
//!
//! The saga splits one business transaction across two processes
//! coordinated by broker events instead of a shared transaction:
//!
//! 1. [`CheckoutService`] validates the input, persists the order in
//!    `order_created`, and publishes an `order_created` envelope carrying
//!    the request's trace context.
//! 2. [`SettlementWorker`] consumes the envelope (possibly more than
//!    once — delivery is at-least-once), charges the payment provider,
//!    moves the order to a terminal status, and publishes a completion
//!    envelope continuing the same trace.
//!
//! The producer never waits for the outcome; the two sides agree only on
//! the envelope contract and the order store.

pub mod checkout;
pub mod error;
pub mod events;
pub mod services;
pub mod settlement;

pub use checkout::{CheckoutReceipt, CheckoutService};
pub use error::{CheckoutError, SettlementError};
pub use events::{OrderCreatedContext, PaymentCompletionContext};
pub use services::{
    CatalogService, ChargeError, ChargeReceipt, InMemoryCatalog, InMemoryPaymentProvider,
    PaymentProvider,
};
pub use settlement::{SettlementOutcome, SettlementWorker};

/// Default topic for `order_created` envelopes consumed by the worker.
pub const TOPIC_PAYMENT_PROCESS: &str = "payment-process";

/// Default topic for settlement completion envelopes.
pub const TOPIC_PAYMENT_COMPLETION: &str = "payment-completion";

/// Currency used for every charge.
pub const CURRENCY_USD: &str = "usd";
