use crate::domain::basket::Basket;
use crate::domain::customer::{Customer, CustomerId};
use crate::domain::order::Order;
use crate::domain::product::{Product, ProductId};

/// Which listing the front end shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Products,
    Customers,
    Basket,
    Order,
}

/// Everything the client knows during a session.
///
/// Owned by the caller and handed to each command; nothing here is global.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub basket: Basket,
    pub selected_customer: Option<CustomerId>,
    /// The last successful checkout, until the next one starts.
    pub order: Option<Order>,
    /// Most recent failure, already phrased for the user.
    pub error: Option<String>,
    /// Most recent success message (e.g. a registration confirmation).
    pub notice: Option<String>,
    pub view: View,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn product(&self, product_id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.product_id == product_id)
    }

    pub fn customer(&self, customer_id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.customer_id == customer_id)
    }

    /// Replaces any previous error.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_messages(&mut self) {
        self.error = None;
        self.notice = None;
    }
}

/// Rendering boundary.
///
/// Observers are told about every dispatched action once the state has
/// settled. They only read the state.
pub trait StateObserver: Send {
    fn state_changed(&mut self, action: &super::commands::Action, state: &AppState);
}
