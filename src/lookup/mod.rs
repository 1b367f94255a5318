//! Read-only access to catalog stock and product details.

mod error;
pub mod http;

use async_trait::async_trait;
use crate::domain::{Product, ProductId, Stock};

pub use error::*;
pub use http::HttpStockLookup;

/// Source of truth for stock levels and product details.
///
/// Stock is fetched on every call and never cached by callers.
#[async_trait]
pub trait StockLookup: Send + Sync {
    async fn get_stock(&self, product_id: ProductId) -> Result<Stock, LookupError>;

    async fn get_product(&self, product_id: ProductId) -> Result<Product, LookupError>;
}
