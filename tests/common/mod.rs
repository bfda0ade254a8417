#![allow(dead_code)]

use rust_decimal::Decimal;
use storefront_client::application::commands::{Action, Command};
use storefront_client::application::state::AppState;
use storefront_client::application::storefront::Storefront;
use storefront_client::domain::customer::Customer;
use storefront_client::domain::product::{Price, Product};
use storefront_client::infrastructure::in_memory::InMemoryGateway;

pub struct Fixture {
    pub gateway: InMemoryGateway,
    pub storefront: Storefront,
    pub state: AppState,
    pub products: Vec<Product>,
    pub customer: Customer,
}

pub fn price(value: Decimal) -> Price {
    Price::new(value).expect("test prices are non-negative")
}

/// A storefront over an in-memory backend with the given `(name, price, stock)`
/// products and one customer, already loaded into state. The call log starts
/// empty.
pub async fn fixture(catalog: &[(&str, Decimal, u32)]) -> Fixture {
    let gateway = InMemoryGateway::new();
    let mut products = Vec::new();
    for (name, value, stock) in catalog {
        products.push(gateway.seed_product(name, price(*value), *stock).await);
    }
    let customer = gateway.seed_customer("Ada", "ada@example.com").await;

    let mut storefront = Storefront::new(Box::new(gateway.clone()));
    let mut state = AppState::new();
    storefront.dispatch(&mut state, Action::Refresh).await;
    gateway.clear_calls().await;

    Fixture {
        gateway,
        storefront,
        state,
        products,
        customer,
    }
}

impl Fixture {
    pub async fn run(&mut self, command: Command) {
        self.storefront
            .dispatch(&mut self.state, Action::Local(command))
            .await;
    }

    pub async fn dispatch(&mut self, action: Action) {
        self.storefront.dispatch(&mut self.state, action).await;
    }
}
