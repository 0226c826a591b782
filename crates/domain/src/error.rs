//! Domain validation errors.

use thiserror::Error;

/// Errors raised by checkout form validation.
///
/// These are user-visible input errors: they are rejected before any
/// order is created and map to a 4xx response at the HTTP layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The checkout contained no product IDs.
    #[error("checkout requires at least one product")]
    NoProducts,

    /// A required field was empty or missing.
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    /// The contact email is not plausibly an email address.
    #[error("invalid email address: {email}")]
    InvalidEmail { email: String },
}
