use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, instrument};

use crate::domain::{Product, ProductId, Stock};
use crate::lookup::{LookupError, StockLookup};
use crate::messages::CatalogRequest;

/// Handle to the in-process catalog service.
#[derive(Clone)]
pub struct CatalogClient {
    sender: mpsc::Sender<CatalogRequest>,
}

impl CatalogClient {
    pub fn new(sender: mpsc::Sender<CatalogRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), LookupError> {
        debug!("Sending shutdown");
        self.sender
            .send(CatalogRequest::Shutdown)
            .await
            .map_err(|_| LookupError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(CatalogClient => fn find_product(product_id: ProductId) -> Option<Product> as CatalogRequest::GetProduct, Error = LookupError);
client_method!(CatalogClient => fn find_stock(product_id: ProductId) -> Option<Stock> as CatalogRequest::GetStock, Error = LookupError);
client_method!(CatalogClient => fn put_product(product: Product, stock: u32) -> () as CatalogRequest::PutProduct, Error = LookupError);
client_method!(CatalogClient => fn set_stock(product_id: ProductId, stock: u32) -> () as CatalogRequest::SetStock, Error = LookupError);

#[async_trait]
impl StockLookup for CatalogClient {
    async fn get_stock(&self, product_id: ProductId) -> Result<Stock, LookupError> {
        self.find_stock(product_id).await?.ok_or(LookupError::NotFound(product_id))
    }

    async fn get_product(&self, product_id: ProductId) -> Result<Product, LookupError> {
        self.find_product(product_id).await?.ok_or(LookupError::NotFound(product_id))
    }
}
