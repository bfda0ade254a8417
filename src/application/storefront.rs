use super::checkout::CheckoutOrchestrator;
use super::commands::{self, Action, Command};
use super::state::{AppState, StateObserver};
use crate::domain::customer::{CustomerDraft, CustomerId};
use crate::domain::ports::StoreGatewayBox;
use crate::domain::product::{ProductDraft, ProductId};
use crate::error::StorefrontError;
use tracing::{info, instrument, warn};

const LOAD_PRODUCTS_FAILED: &str = "Failed to load products.";
const LOAD_CUSTOMERS_FAILED: &str = "Failed to load customers.";
const ADD_PRODUCT_FAILED: &str = "Failed to add product";
const DELETE_PRODUCT_FAILED: &str = "Failed to delete product";
const ADD_CUSTOMER_FAILED: &str = "Failed to add customer";
const REGISTRATION_FAILED: &str = "Registration failed.";
const DELETE_CUSTOMER_FAILED: &str = "Failed to delete customer";

/// The command layer between a front end and the remote API.
///
/// Owns the gateway and the observers; the state is passed in on every
/// dispatch. Every failure ends up as `state.error` and is never returned.
pub struct Storefront {
    gateway: StoreGatewayBox,
    observers: Vec<Box<dyn StateObserver>>,
}

impl Storefront {
    pub fn new(gateway: StoreGatewayBox) -> Self {
        Self {
            gateway,
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn StateObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Runs one action against `state`, then notifies the observers.
    ///
    /// Remote actions start by clearing the previous error and notice.
    pub async fn dispatch(&mut self, state: &mut AppState, action: Action) {
        if action.is_remote() {
            state.clear_messages();
        }

        match &action {
            Action::LoadProducts => self.load_products(state).await,
            Action::LoadCustomers => self.load_customers(state).await,
            Action::Refresh => {
                self.load_products(state).await;
                self.load_customers(state).await;
            }
            Action::CreateProduct(draft) => self.create_product(state, draft).await,
            Action::DeleteProduct(product_id) => self.delete_product(state, *product_id).await,
            Action::CreateCustomer(draft) => self.create_customer(state, draft).await,
            Action::RegisterCustomer(draft) => self.register_customer(state, draft).await,
            Action::DeleteCustomer(customer_id) => {
                self.delete_customer(state, *customer_id).await
            }
            Action::Checkout => self.checkout(state).await,
            Action::Local(command) => self.apply_local(state, command),
        }

        for observer in &mut self.observers {
            observer.state_changed(&action, state);
        }
    }

    fn apply_local(&self, state: &mut AppState, command: &Command) {
        *state = commands::apply(std::mem::take(state), command);
    }

    async fn load_products(&self, state: &mut AppState) {
        match self.gateway.list_products().await {
            Ok(products) => {
                state.basket.reprice(&products);
                state.products = products;
            }
            Err(e) => report(state, &e, LOAD_PRODUCTS_FAILED),
        }
    }

    async fn load_customers(&self, state: &mut AppState) {
        match self.gateway.list_customers().await {
            Ok(customers) => state.customers = customers,
            Err(e) => report(state, &e, LOAD_CUSTOMERS_FAILED),
        }
    }

    #[instrument(skip(self, state, draft), fields(name = %draft.name))]
    async fn create_product(&self, state: &mut AppState, draft: &ProductDraft) {
        if let Err(e) = draft.validate() {
            return report(state, &e, ADD_PRODUCT_FAILED);
        }
        match self.gateway.create_product(draft).await {
            Ok(created) => {
                info!(product_id = ?created.map(|p| p.product_id), "product created");
                self.load_products(state).await;
            }
            Err(e) => report(state, &e, ADD_PRODUCT_FAILED),
        }
    }

    #[instrument(skip(self, state))]
    async fn delete_product(&self, state: &mut AppState, product_id: ProductId) {
        match self.gateway.delete_product(product_id).await {
            Ok(()) => self.load_products(state).await,
            Err(e) => report(state, &e, DELETE_PRODUCT_FAILED),
        }
    }

    #[instrument(skip(self, state, draft), fields(name = %draft.name))]
    async fn create_customer(&self, state: &mut AppState, draft: &CustomerDraft) {
        if let Err(e) = draft.validate_admin() {
            return report(state, &e, ADD_CUSTOMER_FAILED);
        }
        match self.gateway.create_customer(draft).await {
            Ok(created) => {
                info!(customer_id = ?created.map(|c| c.customer_id), "customer created");
                self.load_customers(state).await;
            }
            Err(e) => report(state, &e, ADD_CUSTOMER_FAILED),
        }
    }

    #[instrument(skip(self, state, draft), fields(name = %draft.name))]
    async fn register_customer(&self, state: &mut AppState, draft: &CustomerDraft) {
        if let Err(e) = draft.validate_registration() {
            return report(state, &e, REGISTRATION_FAILED);
        }
        match self.gateway.create_customer(draft).await {
            Ok(created) => {
                let customer_id = created.map(|c| c.customer_id);
                info!(customer_id = ?customer_id, "customer registered");
                state.notice = Some(match customer_id {
                    Some(id) => format!("Successfully registered! Customer ID: {id}"),
                    None => "Successfully registered!".to_string(),
                });
                // A failed reload adds its error next to the notice.
                self.load_customers(state).await;
            }
            Err(e) => report(state, &e, REGISTRATION_FAILED),
        }
    }

    #[instrument(skip(self, state))]
    async fn delete_customer(&self, state: &mut AppState, customer_id: CustomerId) {
        match self.gateway.delete_customer(customer_id).await {
            Ok(()) => {
                if state.selected_customer == Some(customer_id) {
                    state.selected_customer = None;
                }
                self.load_customers(state).await;
            }
            Err(e) => report(state, &e, DELETE_CUSTOMER_FAILED),
        }
    }

    /// Commits the basket for the selected customer.
    ///
    /// The previous order is dropped first. On success the new order is
    /// shown, the basket emptied and the catalog reloaded for fresh stock.
    /// On any failure the basket is left exactly as it was.
    #[instrument(skip(self, state), fields(customer = ?state.selected_customer))]
    async fn checkout(&self, state: &mut AppState) {
        state.order = None;

        let result = CheckoutOrchestrator::new(self.gateway.as_ref())
            .checkout(state.selected_customer, &state.basket)
            .await;

        match result {
            Ok(order) => {
                info!(order_id = ?order.order_id, "checkout committed");
                state.order = Some(order);
                state.basket.clear();
                self.load_products(state).await;
            }
            Err(e) => {
                warn!(error = %e, "checkout failed");
                state.fail(e.user_message());
            }
        }
    }
}

fn report(state: &mut AppState, error: &StorefrontError, fallback: &str) {
    warn!(error = %error, "{}", fallback);
    state.fail(error.user_message(fallback));
}
