//! Order domain model for the storefront checkout pipeline.
//!
//! Defines the [`Order`] record and its status state machine, the
//! [`Shipping`] value object embedded in every order, and the
//! [`CheckoutForm`] validated before any order is created.

pub mod checkout;
pub mod error;
pub mod order;
pub mod status;
pub mod value_objects;

pub use checkout::CheckoutForm;
pub use error::ValidationError;
pub use order::{Order, OrderDraft, Shipping};
pub use status::OrderStatus;
pub use value_objects::{Money, ProductId};
