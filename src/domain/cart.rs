use serde::Serialize;
use super::{Product, ProductId};

/// The shopper's cart: an ordered list of products, unique by id, each with
/// `amount >= 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from stored items, rejecting lists that break the
    /// uniqueness or positive-amount invariants.
    pub fn from_items(items: Vec<Product>) -> Result<Self, String> {
        let mut cart = Self::new();
        for item in items {
            if item.amount == 0 {
                return Err(format!("Product {} has amount 0", item.id));
            }
            if cart.contains(item.id) {
                return Err(format!("Product {} appears more than once", item.id));
            }
            cart.items.push(item);
        }
        Ok(cart)
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn get(&self, product_id: ProductId) -> Option<&Product> {
        self.items.iter().find(|p| p.id == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|p| u64::from(p.amount)).sum()
    }

    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(Product::line_total).sum()
    }

    /// Appends a new line with `amount = 1`. Returns `false` if the id is
    /// already present.
    pub fn push_new(&mut self, product: Product) -> bool {
        if self.contains(product.id) {
            return false;
        }
        self.items.push(product.with_amount(1));
        true
    }

    /// Adds one unit to an existing line.
    pub fn increment(&mut self, product_id: ProductId) -> bool {
        match self.items.iter_mut().find(|p| p.id == product_id) {
            Some(product) => {
                product.amount += 1;
                true
            }
            None => false,
        }
    }

    /// Sets the quantity of an existing line. Missing ids are left alone.
    pub fn set_amount(&mut self, product_id: ProductId, amount: u32) -> bool {
        debug_assert!(amount >= 1);
        match self.items.iter_mut().find(|p| p.id == product_id) {
            Some(product) => {
                product.amount = amount;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, product_id: ProductId) -> Option<Product> {
        let index = self.items.iter().position(|p| p.id == product_id)?;
        Some(self.items.remove(index))
    }
}
