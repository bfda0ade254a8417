use crate::domain::basket::BasketLine;
use crate::domain::customer::{Customer, CustomerDraft, CustomerId};
use crate::domain::order::{Order, OrderLine};
use crate::domain::ports::StoreGateway;
use crate::domain::product::{Price, Product, ProductDraft, ProductId};
use crate::error::{Result, StorefrontError};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Gateway operations, as recorded by [`InMemoryGateway::calls`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    ListProducts,
    CreateProduct,
    DeleteProduct(ProductId),
    ListCustomers,
    CreateCustomer,
    DeleteCustomer(CustomerId),
    AddToBasket(CustomerId, BasketLine),
    Checkout(CustomerId),
}

/// Call kinds used to target injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    ListProducts,
    CreateProduct,
    DeleteProduct,
    ListCustomers,
    CreateCustomer,
    DeleteCustomer,
    AddToBasket,
    Checkout,
}

impl GatewayCall {
    pub fn kind(&self) -> CallKind {
        match self {
            Self::ListProducts => CallKind::ListProducts,
            Self::CreateProduct => CallKind::CreateProduct,
            Self::DeleteProduct(_) => CallKind::DeleteProduct,
            Self::ListCustomers => CallKind::ListCustomers,
            Self::CreateCustomer => CallKind::CreateCustomer,
            Self::DeleteCustomer(_) => CallKind::DeleteCustomer,
            Self::AddToBasket(..) => CallKind::AddToBasket,
            Self::Checkout(_) => CallKind::Checkout,
        }
    }
}

#[derive(Debug, Clone)]
struct InjectedFailure {
    kind: CallKind,
    /// 1-based occurrence of `kind` that fails.
    occurrence: usize,
    status: u16,
    message: Option<String>,
}

#[derive(Default)]
struct Backend {
    products: BTreeMap<ProductId, Product>,
    customers: BTreeMap<CustomerId, Customer>,
    baskets: HashMap<CustomerId, Vec<BasketLine>>,
    next_product_id: i64,
    next_customer_id: i64,
    next_order_id: i64,
    calls: Vec<GatewayCall>,
    counts: HashMap<CallKind, usize>,
    failures: Vec<InjectedFailure>,
}

impl Backend {
    /// Logs the call, then fails it if a matching failure was injected.
    fn record(&mut self, call: GatewayCall) -> Result<()> {
        let kind = call.kind();
        self.calls.push(call);
        let count = self.counts.entry(kind).or_insert(0);
        *count += 1;
        let occurrence = *count;

        match self
            .failures
            .iter()
            .find(|f| f.kind == kind && f.occurrence == occurrence)
        {
            Some(failure) => Err(StorefrontError::RemoteError {
                status: failure.status,
                message: failure.message.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn not_found(what: &str) -> StorefrontError {
    StorefrontError::RemoteError {
        status: 404,
        message: Some(format!("{what} not found")),
    }
}

fn bad_request(message: String) -> StorefrontError {
    StorefrontError::RemoteError {
        status: 400,
        message: Some(message),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// An in-process stand-in for the remote API.
///
/// Keeps products, customers and per-customer server baskets behind
/// `Arc<RwLock<..>>`, so clones share one backend. Every call is logged, and
/// individual calls can be made to fail with a chosen status and message.
/// Used by the test suite and by `--demo`.
#[derive(Default, Clone)]
pub struct InMemoryGateway {
    backend: Arc<RwLock<Backend>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend with a small sample catalog and two customers, for `--demo`.
    pub async fn with_demo_data() -> Self {
        let gateway = Self::new();
        for (name, price, stock) in [
            ("Espresso Beans 1kg", 1850, 12),
            ("Ceramic Mug", 900, 30),
            ("Pour-over Kettle", 4200, 3),
        ] {
            gateway
                .seed_product(name, Price::from_cents(price), stock)
                .await;
        }
        gateway.seed_customer("Ada Lovelace", "ada@example.com").await;
        gateway.seed_customer("Grace Hopper", "grace@example.com").await;
        gateway
    }

    /// Inserts a product directly, bypassing the call log.
    pub async fn seed_product(&self, name: &str, price: Price, stock: u32) -> Product {
        let mut backend = self.backend.write().await;
        backend.next_product_id += 1;
        let product = Product {
            product_id: ProductId(backend.next_product_id),
            name: name.to_string(),
            description: None,
            price,
            stock,
            image_path: None,
        };
        backend.products.insert(product.product_id, product.clone());
        product
    }

    /// Inserts a customer directly, bypassing the call log.
    pub async fn seed_customer(&self, name: &str, email: &str) -> Customer {
        let mut backend = self.backend.write().await;
        backend.next_customer_id += 1;
        let customer = Customer {
            customer_id: CustomerId(backend.next_customer_id),
            name: name.to_string(),
            email: Some(email.to_string()),
            address: None,
            phone_number: None,
            segment: None,
        };
        backend
            .customers
            .insert(customer.customer_id, customer.clone());
        customer
    }

    /// Makes the `occurrence`-th call (1-based) of `kind` fail.
    pub async fn fail_call(
        &self,
        kind: CallKind,
        occurrence: usize,
        status: u16,
        message: Option<&str>,
    ) {
        self.backend.write().await.failures.push(InjectedFailure {
            kind,
            occurrence,
            status,
            message: message.map(str::to_string),
        });
    }

    pub async fn calls(&self) -> Vec<GatewayCall> {
        self.backend.read().await.calls.clone()
    }

    pub async fn clear_calls(&self) {
        let mut backend = self.backend.write().await;
        backend.calls.clear();
        backend.counts.clear();
    }

    /// Lines waiting in a customer's server-side basket.
    pub async fn server_basket(&self, customer_id: CustomerId) -> Vec<BasketLine> {
        self.backend
            .read()
            .await
            .baskets
            .get(&customer_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn stock(&self, product_id: ProductId) -> Option<u32> {
        self.backend
            .read()
            .await
            .products
            .get(&product_id)
            .map(|p| p.stock)
    }
}

#[async_trait]
impl StoreGateway for InMemoryGateway {
    async fn list_products(&self) -> Result<Vec<Product>> {
        let mut backend = self.backend.write().await;
        backend.record(GatewayCall::ListProducts)?;
        Ok(backend.products.values().cloned().collect())
    }

    async fn create_product(&self, draft: &ProductDraft) -> Result<Option<Product>> {
        let mut backend = self.backend.write().await;
        backend.record(GatewayCall::CreateProduct)?;

        let price = Price::new(draft.price).map_err(|e| bad_request(e.to_string()))?;
        let stock = u32::try_from(draft.stock)
            .map_err(|_| bad_request("Stock must not be negative".to_string()))?;

        backend.next_product_id += 1;
        let product = Product {
            product_id: ProductId(backend.next_product_id),
            name: draft.name.clone(),
            description: non_empty(&draft.description),
            price,
            stock,
            image_path: draft.image_path.clone(),
        };
        backend.products.insert(product.product_id, product.clone());
        Ok(Some(product))
    }

    async fn delete_product(&self, product_id: ProductId) -> Result<()> {
        let mut backend = self.backend.write().await;
        backend.record(GatewayCall::DeleteProduct(product_id))?;
        backend
            .products
            .remove(&product_id)
            .map(|_| ())
            .ok_or_else(|| not_found("Product"))
    }

    async fn list_customers(&self) -> Result<Vec<Customer>> {
        let mut backend = self.backend.write().await;
        backend.record(GatewayCall::ListCustomers)?;
        Ok(backend.customers.values().cloned().collect())
    }

    async fn create_customer(&self, draft: &CustomerDraft) -> Result<Option<Customer>> {
        let mut backend = self.backend.write().await;
        backend.record(GatewayCall::CreateCustomer)?;

        backend.next_customer_id += 1;
        let customer = Customer {
            customer_id: CustomerId(backend.next_customer_id),
            name: draft.name.clone(),
            email: non_empty(&draft.email),
            address: non_empty(&draft.address),
            phone_number: non_empty(&draft.phone_number),
            segment: non_empty(&draft.segment),
        };
        backend
            .customers
            .insert(customer.customer_id, customer.clone());
        Ok(Some(customer))
    }

    async fn delete_customer(&self, customer_id: CustomerId) -> Result<()> {
        let mut backend = self.backend.write().await;
        backend.record(GatewayCall::DeleteCustomer(customer_id))?;
        backend.baskets.remove(&customer_id);
        backend
            .customers
            .remove(&customer_id)
            .map(|_| ())
            .ok_or_else(|| not_found("Customer"))
    }

    async fn add_to_basket(&self, customer_id: CustomerId, line: &BasketLine) -> Result<()> {
        let mut backend = self.backend.write().await;
        backend.record(GatewayCall::AddToBasket(customer_id, *line))?;

        if !backend.customers.contains_key(&customer_id) {
            return Err(not_found("Customer"));
        }
        let product = backend
            .products
            .get(&line.product_id)
            .ok_or_else(|| not_found("Product"))?;
        if line.quantity == 0 {
            return Err(bad_request("Quantity must be positive".to_string()));
        }

        let basket = backend.baskets.get(&customer_id);
        let already = basket
            .map(|lines| {
                lines
                    .iter()
                    .filter(|l| l.product_id == line.product_id)
                    .map(|l| l.quantity)
                    .sum::<u32>()
            })
            .unwrap_or(0);
        if already + line.quantity > product.stock {
            return Err(bad_request(format!(
                "Insufficient stock for {}",
                product.name
            )));
        }

        backend.baskets.entry(customer_id).or_default().push(*line);
        Ok(())
    }

    async fn checkout(&self, customer_id: CustomerId) -> Result<Order> {
        let mut backend = self.backend.write().await;
        backend.record(GatewayCall::Checkout(customer_id))?;

        if !backend.customers.contains_key(&customer_id) {
            return Err(not_found("Customer"));
        }
        let lines = backend.baskets.remove(&customer_id).unwrap_or_default();
        if lines.is_empty() {
            return Err(bad_request("Basket is empty".to_string()));
        }

        let mut order_lines = Vec::with_capacity(lines.len());
        for line in &lines {
            let product = backend
                .products
                .get_mut(&line.product_id)
                .ok_or_else(|| not_found("Product"))?;
            product.stock = product.stock.saturating_sub(line.quantity);
            order_lines.push(OrderLine {
                product_id: Some(product.product_id),
                product_name: Some(product.name.clone()),
                quantity: line.quantity,
                unit_price: Some(product.price),
            });
        }

        backend.next_order_id += 1;
        let mut order = Order {
            order_id: Some(backend.next_order_id),
            customer_id: Some(customer_id),
            order_date: Some(Utc::now().to_rfc3339()),
            lines: order_lines,
            total: None,
        };
        order.total = Some(order.display_total());
        Ok(order)
    }
}
