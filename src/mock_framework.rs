//! # Mock Framework
//!
//! Utilities for testing the cart store in isolation.
//!
//! Use [`create_mock_catalog`] to get a catalog client and a receiver, then
//! [`expect_get_stock`] or [`expect_get_product`] to assert requests and
//! script responses. [`StubLookup`] answers from fixed data when the exact
//! request sequence does not matter, and [`RecordingNotifier`] captures the
//! messages shown to the shopper.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::clients::CatalogClient;
use crate::domain::{Product, ProductId, Stock};
use crate::lookup::{LookupError, StockLookup};
use crate::messages::CatalogRequest;
use crate::notifier::Notifier;

/// Creates a mock catalog client and a receiver for asserting requests.
///
/// The client sends messages to a channel the test controls, so the test can
/// answer each request (success, failure, delay) deterministically.
pub fn create_mock_catalog(buffer_size: usize) -> (CatalogClient, mpsc::Receiver<CatalogRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CatalogClient::new(sender), receiver)
}

/// Helper to verify that the next message is a GetStock request
pub async fn expect_get_stock(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(ProductId, oneshot::Sender<Result<Option<Stock>, LookupError>>)> {
    match receiver.recv().await {
        Some(CatalogRequest::GetStock { product_id, respond_to }) => Some((product_id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a GetProduct request
pub async fn expect_get_product(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(ProductId, oneshot::Sender<Result<Option<Product>, LookupError>>)> {
    match receiver.recv().await {
        Some(CatalogRequest::GetProduct { product_id, respond_to }) => Some((product_id, respond_to)),
        _ => None,
    }
}

/// Notifier that keeps every message for later assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
struct StubState {
    stock: HashMap<ProductId, u32>,
    products: HashMap<ProductId, Product>,
    failing: bool,
}

/// Lookup answering from in-memory tables.
#[derive(Clone, Default)]
pub struct StubLookup {
    state: Arc<Mutex<StubState>>,
}

impl StubLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `product` under its own id with the given stock.
    pub fn with_product(self, product: Product, stock: u32) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.stock.insert(product.id, stock);
            state.products.insert(product.id, product);
        }
        self
    }

    pub fn with_stock(self, product_id: ProductId, stock: u32) -> Self {
        self.set_stock(product_id, stock);
        self
    }

    /// Makes `get_product(product_id)` answer with `product` as-is.
    pub fn with_product_response(self, product_id: ProductId, product: Product) -> Self {
        self.state.lock().unwrap().products.insert(product_id, product);
        self
    }

    /// Every call fails with a transport error.
    pub fn failing(self) -> Self {
        self.state.lock().unwrap().failing = true;
        self
    }

    pub fn set_stock(&self, product_id: ProductId, stock: u32) {
        self.state.lock().unwrap().stock.insert(product_id, stock);
    }
}

#[async_trait]
impl StockLookup for StubLookup {
    async fn get_stock(&self, product_id: ProductId) -> Result<Stock, LookupError> {
        let state = self.state.lock().unwrap();
        if state.failing {
            return Err(LookupError::Transport("connection refused".to_string()));
        }
        state
            .stock
            .get(&product_id)
            .map(|&amount| Stock::new(product_id, amount))
            .ok_or(LookupError::NotFound(product_id))
    }

    async fn get_product(&self, product_id: ProductId) -> Result<Product, LookupError> {
        let state = self.state.lock().unwrap();
        if state.failing {
            return Err(LookupError::Transport("connection refused".to_string()));
        }
        state.products.get(&product_id).cloned().ok_or(LookupError::NotFound(product_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_catalog() {
        let (client, mut receiver) = create_mock_catalog(10);

        let stock_task = tokio::spawn(async move { client.get_stock(7).await });

        let (product_id, responder) = expect_get_stock(&mut receiver).await.expect("Expected GetStock request");
        assert_eq!(product_id, 7);
        responder.send(Ok(Some(Stock::new(7, 2)))).unwrap();

        let result = stock_task.await.unwrap();
        assert_eq!(result, Ok(Stock::new(7, 2)));
    }

    #[tokio::test]
    async fn test_stub_lookup_tables() {
        let stub = StubLookup::new().with_product(Product::new(1, "Tênis", 10.0, "1.jpg"), 4);
        assert_eq!(stub.get_stock(1).await, Ok(Stock::new(1, 4)));
        assert_eq!(stub.get_stock(2).await, Err(LookupError::NotFound(2)));

        stub.set_stock(1, 0);
        assert_eq!(stub.get_stock(1).await.unwrap().amount, 0);
    }
}
