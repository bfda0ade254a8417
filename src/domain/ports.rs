use super::basket::BasketLine;
use super::customer::{Customer, CustomerDraft, CustomerId};
use super::order::Order;
use super::product::{Product, ProductDraft, ProductId};
use crate::error::Result;
use async_trait::async_trait;

/// The remote e-commerce API as seen by the client.
///
/// Every method is one request. Implementations never retry.
#[async_trait]
pub trait StoreGateway: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>>;
    /// Returns the created record when the response body carries one.
    async fn create_product(&self, draft: &ProductDraft) -> Result<Option<Product>>;
    async fn delete_product(&self, product_id: ProductId) -> Result<()>;

    async fn list_customers(&self) -> Result<Vec<Customer>>;
    /// Returns the created record when the response body carries one.
    async fn create_customer(&self, draft: &CustomerDraft) -> Result<Option<Customer>>;
    async fn delete_customer(&self, customer_id: CustomerId) -> Result<()>;

    /// Adds one line to the customer's server-side basket.
    async fn add_to_basket(&self, customer_id: CustomerId, line: &BasketLine) -> Result<()>;
    /// Turns the customer's server-side basket into an order.
    async fn checkout(&self, customer_id: CustomerId) -> Result<Order>;
}

pub type StoreGatewayBox = Box<dyn StoreGateway>;
