use crate::error::StorefrontError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub i64);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A customer as listed by the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(alias = "id", alias = "CustomerId")]
    pub customer_id: CustomerId,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Email")]
    pub email: Option<String>,
    #[serde(default, alias = "Address")]
    pub address: Option<String>,
    #[serde(default, alias = "PhoneNumber")]
    pub phone_number: Option<String>,
    #[serde(default, alias = "Segment")]
    pub segment: Option<String>,
}

/// Form input for a new customer.
///
/// Admins only need a name and an email; self-registration requires every
/// field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: String,
    pub segment: String,
}

impl CustomerDraft {
    pub fn validate_admin(&self) -> Result<(), StorefrontError> {
        if is_blank(&self.name) || is_blank(&self.email) {
            return Err(StorefrontError::ValidationError(
                "Name and email are required to add a customer.".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_registration(&self) -> Result<(), StorefrontError> {
        let fields = [
            &self.name,
            &self.address,
            &self.segment,
            &self.email,
            &self.phone_number,
        ];
        if fields.iter().any(|field| is_blank(field)) {
            return Err(StorefrontError::ValidationError(
                "Please fill in all registration fields.".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_draft() -> CustomerDraft {
        CustomerDraft {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            address: "1 Analytical Way".to_string(),
            phone_number: "555-0100".to_string(),
            segment: "Retail".to_string(),
        }
    }

    #[test]
    fn test_admin_validation_needs_name_and_email() {
        let draft = CustomerDraft {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            ..Default::default()
        };
        assert!(draft.validate_admin().is_ok());

        let missing_email = CustomerDraft {
            email: String::new(),
            ..draft
        };
        assert_eq!(
            missing_email.validate_admin().unwrap_err().to_string(),
            "Name and email are required to add a customer."
        );
    }

    #[test]
    fn test_registration_needs_every_field() {
        assert!(full_draft().validate_registration().is_ok());

        let no_phone = CustomerDraft {
            phone_number: " ".to_string(),
            ..full_draft()
        };
        assert_eq!(
            no_phone.validate_registration().unwrap_err().to_string(),
            "Please fill in all registration fields."
        );
    }

    #[test]
    fn test_customer_deserialization() {
        let customer: Customer = serde_json::from_str(
            r#"{"customerId": 3, "name": "Ada", "email": "ada@example.com", "phoneNumber": "555"}"#,
        )
        .unwrap();
        assert_eq!(customer.customer_id, CustomerId(3));
        assert_eq!(customer.phone_number.as_deref(), Some("555"));
        assert_eq!(customer.segment, None);

        let pascal: Customer =
            serde_json::from_str(r#"{"CustomerId": 4, "Name": "Bob", "Segment": "B2B"}"#).unwrap();
        assert_eq!(pascal.customer_id, CustomerId(4));
        assert_eq!(pascal.segment.as_deref(), Some("B2B"));
    }

    #[test]
    fn test_draft_serializes_camel_case() {
        let json = serde_json::to_value(full_draft()).unwrap();
        assert_eq!(json["phoneNumber"], "555-0100");
        assert_eq!(json["segment"], "Retail");
    }
}
