//! Payment provider trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::Money;
use thiserror::Error;

/// Result of a successful charge.
#[derive(Debug, Clone)]
pub struct ChargeReceipt {
    /// The charge ID assigned by the provider.
    pub charge_id: String,
}

/// Errors returned by the payment provider.
///
/// Both variants resolve the saga to `payment_failed`: the worker never
/// retries a charge itself, so a transient provider fault and a hard
/// decline end the same way. Retry, if any, is a broker redelivery of
/// the whole invocation before the order turns terminal.
#[derive(Debug, Error)]
pub enum ChargeError {
    /// The provider refused the charge (bad token, declined card).
    #[error("charge declined: {0}")]
    Declined(String),

    /// The provider could not be reached or errored internally.
    #[error("payment provider unavailable: {0}")]
    Unavailable(String),
}

/// Trait for the external payment provider.
///
/// Treated as a black box that accepts `(amount, currency, token)` and
/// may fail transiently or permanently.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Attempts to charge the given amount against a payment token.
    async fn charge(
        &self,
        amount: Money,
        currency: &str,
        token: &str,
    ) -> Result<ChargeReceipt, ChargeError>;
}

#[derive(Debug, Default)]
struct InMemoryProviderState {
    charges: Vec<(String, Money, String)>,
    next_id: u32,
    fail_on_charge: bool,
}

/// In-memory payment provider for local runs and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentProvider {
    state: Arc<RwLock<InMemoryProviderState>>,
}

impl InMemoryPaymentProvider {
    /// Creates a new in-memory payment provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the provider to decline all charges.
    pub fn set_fail_on_charge(&self, fail: bool) {
        self.state.write().unwrap().fail_on_charge = fail;
    }

    /// Returns the number of charge attempts that succeeded.
    pub fn charge_count(&self) -> usize {
        self.state.read().unwrap().charges.len()
    }

    /// Returns the token used for the most recent charge, if any.
    pub fn last_token(&self) -> Option<String> {
        self.state
            .read()
            .unwrap()
            .charges
            .last()
            .map(|(token, _, _)| token.clone())
    }
}

#[async_trait]
impl PaymentProvider for InMemoryPaymentProvider {
    async fn charge(
        &self,
        amount: Money,
        currency: &str,
        token: &str,
    ) -> Result<ChargeReceipt, ChargeError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_charge {
            return Err(ChargeError::Declined("card declined".to_string()));
        }

        state.next_id += 1;
        let charge_id = format!("ch_{:04}", state.next_id);
        state
            .charges
            .push((token.to_string(), amount, currency.to_string()));

        Ok(ChargeReceipt { charge_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_charge_records_attempt() {
        let provider = InMemoryPaymentProvider::new();

        let receipt = provider
            .charge(Money::from_cents(1000), "usd", "tok_123")
            .await
            .unwrap();

        assert!(receipt.charge_id.starts_with("ch_"));
        assert_eq!(provider.charge_count(), 1);
        assert_eq!(provider.last_token().as_deref(), Some("tok_123"));
    }

    #[tokio::test]
    async fn test_fail_on_charge() {
        let provider = InMemoryPaymentProvider::new();
        provider.set_fail_on_charge(true);

        let err = provider
            .charge(Money::from_cents(1000), "usd", "tok_123")
            .await
            .unwrap_err();

        assert!(matches!(err, ChargeError::Declined(_)));
        assert_eq!(provider.charge_count(), 0);
    }

    #[tokio::test]
    async fn test_sequential_charge_ids() {
        let provider = InMemoryPaymentProvider::new();

        let r1 = provider
            .charge(Money::from_cents(1000), "usd", "tok_a")
            .await
            .unwrap();
        let r2 = provider
            .charge(Money::from_cents(2000), "usd", "tok_b")
            .await
            .unwrap();

        assert_eq!(r1.charge_id, "ch_0001");
        assert_eq!(r2.charge_id, "ch_0002");
    }
}
