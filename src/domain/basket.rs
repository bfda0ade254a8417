use super::product::{Price, Product, ProductId};
use serde::{Deserialize, Serialize};

/// One product in the basket with its quantity.
///
/// The quantity is never below 1; only `Basket` can change it.
#[derive(Debug, Clone, PartialEq)]
pub struct BasketItem {
    pub product: Product,
    quantity: u32,
}

impl BasketItem {
    fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity
    }

    pub fn line(&self) -> BasketLine {
        BasketLine {
            product_id: self.product_id(),
            quantity: self.quantity,
        }
    }
}

/// Wire payload for one "add to remote basket" call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// Client-local basket.
///
/// Holds at most one item per product id, in insertion order. Totals are
/// derived on every call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Basket {
    items: Vec<BasketItem>,
}

impl Basket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product`, merging with an existing item.
    pub fn add(&mut self, product: Product) {
        match self.position(product.product_id) {
            Some(index) => self.items[index].quantity += 1,
            None => self.items.push(BasketItem::new(product)),
        }
    }

    /// Returns `false` when the product is not in the basket.
    pub fn increase(&mut self, product_id: ProductId) -> bool {
        match self.item_mut(product_id) {
            Some(item) => {
                item.quantity += 1;
                true
            }
            None => false,
        }
    }

    /// Decrements the quantity, stopping at 1. The item is never removed here.
    pub fn decrease(&mut self, product_id: ProductId) -> bool {
        match self.item_mut(product_id) {
            Some(item) => {
                if item.quantity > 1 {
                    item.quantity -= 1;
                }
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, product_id: ProductId) -> Option<BasketItem> {
        self.position(product_id)
            .map(|index| self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total(&self) -> Price {
        self.items.iter().map(BasketItem::line_total).sum()
    }

    /// Number of units across all items.
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Replaces product snapshots with fresh catalog data.
    ///
    /// Items whose product is no longer listed keep their previous snapshot.
    pub fn reprice(&mut self, products: &[Product]) {
        for item in &mut self.items {
            if let Some(fresh) = products
                .iter()
                .find(|p| p.product_id == item.product.product_id)
            {
                item.product = fresh.clone();
            }
        }
    }

    pub fn lines(&self) -> Vec<BasketLine> {
        self.items.iter().map(BasketItem::line).collect()
    }

    pub fn get(&self, product_id: ProductId) -> Option<&BasketItem> {
        self.items.iter().find(|item| item.product_id() == product_id)
    }

    pub fn items(&self) -> &[BasketItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product_id() == product_id)
    }

    fn item_mut(&mut self, product_id: ProductId) -> Option<&mut BasketItem> {
        self.items
            .iter_mut()
            .find(|item| item.product_id() == product_id)
    }
}
