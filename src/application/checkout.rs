use crate::domain::basket::Basket;
use crate::domain::customer::CustomerId;
use crate::domain::order::Order;
use crate::domain::ports::StoreGateway;
use crate::domain::product::ProductId;
use crate::error::StorefrontError;
use thiserror::Error;
use tracing::{debug, instrument};

pub const NO_CUSTOMER: &str = "Please select a customer before checking out.";
pub const EMPTY_BASKET: &str = "Basket is empty. Please add items before checkout.";
pub const ADD_ITEM_FAILED: &str = "Failed to add item to basket";
pub const COMMIT_FAILED: &str = "Checkout failed.";

/// Why a checkout stopped, by stage.
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Rejected locally; nothing was sent.
    #[error("{0}")]
    Precondition(&'static str),
    #[error("adding product {product_id} to the remote basket failed: {source}")]
    AddItem {
        product_id: ProductId,
        source: StorefrontError,
    },
    #[error("checkout commit failed: {0}")]
    Commit(StorefrontError),
}

impl CheckoutError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Precondition(message) => (*message).to_string(),
            Self::AddItem { source, .. } => source.user_message(ADD_ITEM_FAILED),
            Self::Commit(source) => source.user_message(COMMIT_FAILED),
        }
    }
}

/// Commits a local basket to the remote order system.
///
/// Lines are pushed one at a time, in basket order, each awaited before the
/// next. The first failure ends the run. The basket is only read; clearing
/// it after a successful commit is the caller's job.
pub struct CheckoutOrchestrator<'a> {
    gateway: &'a dyn StoreGateway,
}

impl<'a> CheckoutOrchestrator<'a> {
    pub fn new(gateway: &'a dyn StoreGateway) -> Self {
        Self { gateway }
    }

    #[instrument(skip(self, basket), fields(items = basket.len()))]
    pub async fn checkout(
        &self,
        customer_id: Option<CustomerId>,
        basket: &Basket,
    ) -> Result<Order, CheckoutError> {
        let customer_id = customer_id.ok_or(CheckoutError::Precondition(NO_CUSTOMER))?;
        if basket.is_empty() {
            return Err(CheckoutError::Precondition(EMPTY_BASKET));
        }

        for line in basket.lines() {
            self.gateway
                .add_to_basket(customer_id, &line)
                .await
                .map_err(|source| CheckoutError::AddItem {
                    product_id: line.product_id,
                    source,
                })?;
            debug!(product_id = %line.product_id, quantity = line.quantity, "line added");
        }

        self.gateway
            .checkout(customer_id)
            .await
            .map_err(CheckoutError::Commit)
    }
}
