//! Checkout form input and validation.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::order::Shipping;
use crate::value_objects::ProductId;

/// Raw checkout input, validated before any order is created.
///
/// Mirrors the fields a buyer submits at checkout: the products being
/// purchased, where to ship them, and an optional payment token. A
/// missing token is the "pay later" path, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub product_ids: Vec<ProductId>,
    pub address_1: String,
    pub address_2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub email: String,
    pub mobile: String,
    pub token: Option<String>,
}

impl CheckoutForm {
    /// Validates the form, rejecting bad input before any write happens.
    ///
    /// `address_2` is the only optional shipping field; everything else
    /// must be non-empty and the product list must not be empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.product_ids.is_empty() || self.product_ids.iter().any(|p| p.as_str().is_empty()) {
            return Err(ValidationError::NoProducts);
        }

        let required: [(&'static str, &str); 6] = [
            ("address_1", &self.address_1),
            ("city", &self.city),
            ("state", &self.state),
            ("zip_code", &self.zip_code),
            ("email", &self.email),
            ("mobile", &self.mobile),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField { field });
            }
        }

        if !self.email.contains('@') {
            return Err(ValidationError::InvalidEmail {
                email: self.email.clone(),
            });
        }

        Ok(())
    }

    /// Builds the shipping record embedded in the order.
    pub fn shipping(&self) -> Shipping {
        Shipping {
            address_1: self.address_1.clone(),
            address_2: self.address_2.clone().unwrap_or_default(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip_code: self.zip_code.clone(),
            email: self.email.clone(),
            mobile: self.mobile.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> CheckoutForm {
        CheckoutForm {
            product_ids: vec![ProductId::new("SKU-001")],
            address_1: "1600 Amphitheatre Pkwy".to_string(),
            address_2: None,
            city: "Mountain View".to_string(),
            state: "CA".to_string(),
            zip_code: "94043".to_string(),
            email: "buyer@example.com".to_string(),
            mobile: "555-0100".to_string(),
            token: Some("tok_123".to_string()),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn test_tokenless_form_is_valid() {
        let mut form = valid_form();
        form.token = None;
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_empty_product_list_rejected() {
        let mut form = valid_form();
        form.product_ids.clear();
        assert_eq!(form.validate(), Err(ValidationError::NoProducts));
    }

    #[test]
    fn test_blank_product_id_rejected() {
        let mut form = valid_form();
        form.product_ids.push(ProductId::new(""));
        assert_eq!(form.validate(), Err(ValidationError::NoProducts));
    }

    #[test]
    fn test_missing_city_rejected() {
        let mut form = valid_form();
        form.city = "  ".to_string();
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField { field: "city" })
        );
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut form = valid_form();
        form.email = "not-an-email".to_string();
        assert!(matches!(
            form.validate(),
            Err(ValidationError::InvalidEmail { .. })
        ));
    }

    #[test]
    fn test_shipping_fills_optional_address_line() {
        let mut form = valid_form();
        form.address_2 = Some("Suite 200".to_string());
        assert_eq!(form.shipping().address_2, "Suite 200");

        form.address_2 = None;
        assert_eq!(form.shipping().address_2, "");
    }
}
