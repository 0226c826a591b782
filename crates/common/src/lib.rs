//! Shared identifier types used across the checkout pipeline.

mod types;

pub use types::{OrderId, UserId};
