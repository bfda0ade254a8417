//! HTTP implementation of the store gateway.
//!
//! Talks JSON to the remote API with `reqwest`. Any non-2xx status becomes a
//! `RemoteError` carrying the server's message when the body has one.

use crate::config::ClientConfig;
use crate::domain::basket::BasketLine;
use crate::domain::customer::{Customer, CustomerDraft, CustomerId};
use crate::domain::order::Order;
use crate::domain::ports::StoreGateway;
use crate::domain::product::{Product, ProductDraft, ProductId};
use crate::error::{Result, StorefrontError};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

/// Body fields checked, in order, for a human-readable error message.
const MESSAGE_FIELDS: [&str; 4] = ["message", "Message", "detail", "title"];

#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| StorefrontError::ConfigError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| StorefrontError::ConfigError(format!("invalid request path {path}: {e}")))
    }

    /// Sends the request and returns the response if its status is 2xx.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_message(&body);
        warn!(status = status.as_u16(), message = ?message, "request rejected by API");
        Err(StorefrontError::RemoteError {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| StorefrontError::DecodeError(e.to_string()))
    }

    /// For create calls: the status decides success, the body is optional.
    async fn send_created<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Option<T>> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        match serde_json::from_slice(&bytes) {
            Ok(created) => Ok(Some(created)),
            Err(e) => {
                debug!(error = %e, "created record not echoed in response body");
                Ok(None)
            }
        }
    }
}

/// Pulls a message out of an error body.
///
/// JSON objects are searched for [`MESSAGE_FIELDS`]; a bare JSON string is
/// used as-is. Anything else yields `None`.
pub fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let text = match &value {
        serde_json::Value::String(text) => Some(text.as_str()),
        serde_json::Value::Object(fields) => MESSAGE_FIELDS
            .iter()
            .find_map(|key| fields.get(*key).and_then(serde_json::Value::as_str)),
        _ => None,
    }?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[async_trait]
impl StoreGateway for HttpGateway {
    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>> {
        let url = self.url("api/Products")?;
        self.send_json(self.client.get(url)).await
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    async fn create_product(&self, draft: &ProductDraft) -> Result<Option<Product>> {
        let url = self.url("api/Products")?;
        self.send_created(self.client.post(url).json(draft)).await
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, product_id: ProductId) -> Result<()> {
        let url = self.url(&format!("api/Products/{product_id}"))?;
        self.send(self.client.delete(url)).await.map(|_| ())
    }

    #[instrument(skip(self))]
    async fn list_customers(&self) -> Result<Vec<Customer>> {
        let url = self.url("api/Customers")?;
        self.send_json(self.client.get(url)).await
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    async fn create_customer(&self, draft: &CustomerDraft) -> Result<Option<Customer>> {
        let url = self.url("api/Customers")?;
        self.send_created(self.client.post(url).json(draft)).await
    }

    #[instrument(skip(self))]
    async fn delete_customer(&self, customer_id: CustomerId) -> Result<()> {
        let url = self.url(&format!("api/Customers/{customer_id}"))?;
        self.send(self.client.delete(url)).await.map(|_| ())
    }

    #[instrument(skip(self))]
    async fn add_to_basket(&self, customer_id: CustomerId, line: &BasketLine) -> Result<()> {
        let url = self.url(&format!("api/Basket/{customer_id}/add"))?;
        self.send(self.client.post(url).json(line)).await.map(|_| ())
    }

    #[instrument(skip(self))]
    async fn checkout(&self, customer_id: CustomerId) -> Result<Order> {
        let url = self.url(&format!("api/Orders/{customer_id}/checkout"))?;
        self.send_json(self.client.post(url)).await
    }
}
