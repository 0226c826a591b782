//! Catalog price lookup trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::{Money, ProductId};

use crate::error::CheckoutError;

/// Trait for catalog price lookups.
///
/// Prices are read once per checkout; they are not locked or reserved,
/// so a race with a concurrent price change is possible and accepted.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Returns the current price for a product.
    async fn get_price(&self, product_id: &ProductId) -> Result<Money, CheckoutError>;
}

/// In-memory catalog for local runs and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    prices: Arc<RwLock<HashMap<ProductId, Money>>>,
}

impl InMemoryCatalog {
    /// Creates a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or replaces the price for a product.
    pub fn set_price(&self, product_id: impl Into<ProductId>, price: Money) {
        self.prices
            .write()
            .unwrap()
            .insert(product_id.into(), price);
    }

    /// Returns the number of priced products.
    pub fn product_count(&self) -> usize {
        self.prices.read().unwrap().len()
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalog {
    async fn get_price(&self, product_id: &ProductId) -> Result<Money, CheckoutError> {
        self.prices
            .read()
            .unwrap()
            .get(product_id)
            .copied()
            .ok_or_else(|| CheckoutError::PriceNotFound(product_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get_price() {
        let catalog = InMemoryCatalog::new();
        catalog.set_price("SKU-001", Money::from_cents(1000));

        let price = catalog
            .get_price(&ProductId::new("SKU-001"))
            .await
            .unwrap();
        assert_eq!(price.cents(), 1000);
    }

    #[tokio::test]
    async fn test_unknown_product_errors() {
        let catalog = InMemoryCatalog::new();
        let err = catalog
            .get_price(&ProductId::new("SKU-404"))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::PriceNotFound(_)));
    }

    #[tokio::test]
    async fn test_set_price_replaces_existing() {
        let catalog = InMemoryCatalog::new();
        catalog.set_price("SKU-001", Money::from_cents(1000));
        catalog.set_price("SKU-001", Money::from_cents(1500));

        let price = catalog
            .get_price(&ProductId::new("SKU-001"))
            .await
            .unwrap();
        assert_eq!(price.cents(), 1500);
        assert_eq!(catalog.product_count(), 1);
    }
}
