use crate::error::StorefrontError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

/// Catalog identifier of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-negative unit price.
///
/// Wraps `rust_decimal::Decimal` so basket totals never go through floats.
/// Serialized as a plain JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, StorefrontError> {
        if value >= Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(StorefrontError::ValidationError(
                "Price must not be negative".to_string(),
            ))
        }
    }

    /// Builds a price from a whole number of cents.
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = StorefrontError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Price {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

/// Line price: unit price times quantity.
impl Mul<u32> for Price {
    type Output = Self;
    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0 * Decimal::from(rhs))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, price| acc + price)
    }
}

/// A product as listed by the remote catalog.
///
/// The API has shipped the identifier as `productId`, `id` and `ProductId`;
/// all three are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(alias = "id", alias = "ProductId")]
    pub product_id: ProductId,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default, alias = "Description")]
    pub description: Option<String>,
    #[serde(alias = "Price")]
    pub price: Price,
    #[serde(default, alias = "Stock")]
    pub stock: u32,
    #[serde(default, alias = "ImagePath", skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
}

/// Admin form input for a new product.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
}

impl ProductDraft {
    pub fn validate(&self) -> Result<(), StorefrontError> {
        if self.name.trim().is_empty() || self.price <= Decimal::ZERO || self.stock < 0 {
            return Err(StorefrontError::ValidationError(
                "Please enter valid product details.".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_rejects_negative() {
        assert!(Price::new(dec!(0)).is_ok());
        assert!(matches!(
            Price::new(dec!(-0.01)),
            Err(StorefrontError::ValidationError(_))
        ));
    }

    #[test]
    fn test_price_from_cents() {
        assert_eq!(Price::from_cents(1850).value(), dec!(18.50));
        assert_eq!(Price::from_cents(900).to_string(), "9.00");
    }

    #[test]
    fn test_price_arithmetic() {
        let unit = Price::new(dec!(2.50)).unwrap();
        assert_eq!(unit * 3, Price::new(dec!(7.50)).unwrap());
        let total: Price = vec![unit, unit * 2].into_iter().sum();
        assert_eq!(total.value(), dec!(7.50));
        assert_eq!(total.to_string(), "7.50");
    }

    #[test]
    fn test_product_accepts_id_aliases() {
        let camel: Product =
            serde_json::from_str(r#"{"productId": 7, "name": "Mug", "price": 4.5, "stock": 3}"#)
                .unwrap();
        let bare: Product =
            serde_json::from_str(r#"{"id": 7, "name": "Mug", "price": 4.5, "stock": 3}"#).unwrap();
        let pascal: Product = serde_json::from_str(
            r#"{"ProductId": 7, "Name": "Mug", "Price": 4.5, "Stock": 3, "Description": null}"#,
        )
        .unwrap();

        assert_eq!(camel.product_id, ProductId(7));
        assert_eq!(camel, bare);
        assert_eq!(camel, pascal);
        assert_eq!(camel.price.value(), dec!(4.5));
    }

    #[test]
    fn test_product_rejects_negative_price() {
        let result: Result<Product, _> =
            serde_json::from_str(r#"{"id": 1, "name": "Bad", "price": -1, "stock": 0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_draft_validation() {
        let draft = ProductDraft {
            name: "Lamp".to_string(),
            price: dec!(19.99),
            stock: 5,
            ..Default::default()
        };
        assert!(draft.validate().is_ok());

        for bad in [
            ProductDraft {
                name: "  ".to_string(),
                ..draft.clone()
            },
            ProductDraft {
                price: dec!(0),
                ..draft.clone()
            },
            ProductDraft {
                stock: -1,
                ..draft.clone()
            },
        ] {
            let err = bad.validate().unwrap_err();
            assert_eq!(err.to_string(), "Please enter valid product details.");
        }
    }

    #[test]
    fn test_draft_serializes_camel_case_numbers() {
        let draft = ProductDraft {
            name: "Lamp".to_string(),
            description: "Desk lamp".to_string(),
            price: dec!(19.99),
            stock: 5,
            image_path: None,
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["name"], "Lamp");
        assert_eq!(json["price"], serde_json::json!(19.99));
        assert_eq!(json["stock"], 5);
        assert!(json.get("imagePath").is_none());
    }
}
