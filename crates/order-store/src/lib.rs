//! Durable keyed storage for order records.
//!
//! The store owns order creation (it assigns IDs) and status updates.
//! Updates are whole-record overwrites guarded by a compare-and-swap on
//! the current status, which is what makes settlement safe under
//! at-least-once delivery: a redelivered invocation that tries to move an
//! already-terminal order fails with [`StoreError::StatusConflict`]
//! instead of regressing it.
//!
//! The store never emits events; publishing after a successful write is
//! the caller's responsibility.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::InMemoryOrderStore;
pub use postgres::PostgresOrderStore;
pub use store::OrderStore;
