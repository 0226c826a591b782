//! External collaborator traits and their in-memory implementations.

pub mod catalog;
pub mod payment;

pub use catalog::{CatalogService, InMemoryCatalog};
pub use payment::{ChargeError, ChargeReceipt, InMemoryPaymentProvider, PaymentProvider};
