use super::customer::CustomerId;
use super::product::{Price, ProductId};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// An order returned by a successful checkout.
///
/// The client only displays orders, so every field is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, alias = "id", alias = "OrderId")]
    pub order_id: Option<i64>,
    #[serde(default, alias = "CustomerId")]
    pub customer_id: Option<CustomerId>,
    #[serde(default, alias = "OrderDate", alias = "createdAt")]
    pub order_date: Option<String>,
    #[serde(
        default,
        alias = "items",
        alias = "orderItems",
        alias = "OrderItems",
        alias = "Lines"
    )]
    pub lines: Vec<OrderLine>,
    #[serde(default, alias = "totalAmount", alias = "TotalAmount", alias = "Total")]
    pub total: Option<Price>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    #[serde(default, alias = "ProductId")]
    pub product_id: Option<ProductId>,
    #[serde(default, alias = "ProductName", alias = "name")]
    pub product_name: Option<String>,
    #[serde(default, alias = "Quantity")]
    pub quantity: u32,
    #[serde(default, alias = "UnitPrice", alias = "price")]
    pub unit_price: Option<Price>,
}

impl Order {
    /// Order date as `YYYY-MM-DD`, or an empty string when absent.
    ///
    /// Accepts RFC 3339 timestamps, offset-less timestamps and bare dates.
    /// Anything else is shown unchanged.
    pub fn formatted_date(&self) -> String {
        let Some(raw) = self.order_date.as_deref() else {
            return String::new();
        };
        let date = DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.date_naive())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
            .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"));
        match date {
            Ok(date) => date.format("%Y-%m-%d").to_string(),
            Err(_) => raw.to_string(),
        }
    }

    /// The server total, or the sum of line prices when the server sent none.
    pub fn display_total(&self) -> Price {
        self.total.unwrap_or_else(|| {
            self.lines
                .iter()
                .filter_map(|line| line.unit_price.map(|price| price * line.quantity))
                .sum()
        })
    }
}
