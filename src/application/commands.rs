use super::state::{AppState, View};
use crate::domain::customer::{CustomerDraft, CustomerId};
use crate::domain::product::{ProductDraft, ProductId};

/// Commands that only touch local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddToBasket(ProductId),
    Increase(ProductId),
    Decrease(ProductId),
    Remove(ProductId),
    ClearBasket,
    SelectCustomer(CustomerId),
    DeselectCustomer,
    Show(View),
}

/// Everything a front end can ask for.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadProducts,
    LoadCustomers,
    Refresh,
    CreateProduct(ProductDraft),
    DeleteProduct(ProductId),
    CreateCustomer(CustomerDraft),
    RegisterCustomer(CustomerDraft),
    DeleteCustomer(CustomerId),
    Checkout,
    Local(Command),
}

impl Action {
    /// True when handling the action talks to the gateway.
    pub fn is_remote(&self) -> bool {
        !matches!(self, Self::Local(_))
    }
}

impl From<Command> for Action {
    fn from(command: Command) -> Self {
        Self::Local(command)
    }
}

/// Applies a local command: state in, new state out.
///
/// Each command starts by clearing the previous error. Commands naming a
/// product outside the cached catalog (or outside the basket), or a customer
/// outside the cached customer list, set an error and leave everything else
/// as it was.
pub fn apply(mut state: AppState, command: &Command) -> AppState {
    state.error = None;
    match command {
        Command::AddToBasket(product_id) => match state.product(*product_id).cloned() {
            Some(product) => state.basket.add(product),
            None => state.fail(format!("Product {product_id} is not in the catalog.")),
        },
        Command::Increase(product_id) => {
            if !state.basket.increase(*product_id) {
                state.fail(not_in_basket(*product_id));
            }
        }
        Command::Decrease(product_id) => {
            if !state.basket.decrease(*product_id) {
                state.fail(not_in_basket(*product_id));
            }
        }
        Command::Remove(product_id) => {
            if state.basket.remove(*product_id).is_none() {
                state.fail(not_in_basket(*product_id));
            }
        }
        Command::ClearBasket => state.basket.clear(),
        Command::SelectCustomer(customer_id) => {
            if state.customer(*customer_id).is_some() {
                state.selected_customer = Some(*customer_id);
            } else {
                state.fail(format!("Customer {customer_id} is not in the customer list."));
            }
        }
        Command::DeselectCustomer => state.selected_customer = None,
        Command::Show(view) => state.view = *view,
    }
    state
}

fn not_in_basket(product_id: ProductId) -> String {
    format!("Product {product_id} is not in the basket.")
}
