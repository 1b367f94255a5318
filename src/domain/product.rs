use serde::{Deserialize, Serialize};

pub type ProductId = u64;

/// A catalog product, or a cart line when `amount` is non-zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(alias = "title")]
    pub name: String,
    pub price: f64,
    #[serde(alias = "image")]
    pub image_url: String,
    /// Quantity held in the cart. Catalog responses omit it.
    #[serde(default)]
    pub amount: u32,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: f64, image_url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image_url: image_url.into(),
            amount: 0,
        }
    }

    /// Returns a copy of this product carrying the given cart quantity.
    pub fn with_amount(mut self, amount: u32) -> Self {
        self.amount = amount;
        self
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.amount)
    }
}

/// Available inventory for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    #[serde(alias = "id")]
    pub product_id: ProductId,
    pub amount: u32,
}

impl Stock {
    pub fn new(product_id: ProductId, amount: u32) -> Self {
        Self { product_id, amount }
    }
}

/// Payload of a set-amount request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}
