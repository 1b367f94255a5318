use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::clients::CatalogClient;
use crate::domain::{Product, ProductId, Stock};
use crate::lookup::LookupError;
use crate::messages::{CatalogRequest, ServiceResponse};

/// Catalog actor holding products and their stock.
///
/// Serves the storefront when no remote catalog API is configured.
pub struct CatalogService {
    receiver: mpsc::Receiver<CatalogRequest>,
    products: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, u32>,
}

impl CatalogService {
    pub fn new(buffer_size: usize) -> (Self, CatalogClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            products: HashMap::new(),
            stock: HashMap::new(),
        };
        let client = CatalogClient::new(sender);
        (service, client)
    }

    #[instrument(name = "catalog_service", skip(self))]
    pub async fn run(mut self) {
        info!("CatalogService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CatalogRequest::GetProduct { product_id, respond_to } => {
                    self.handle_get_product(product_id, respond_to);
                }
                CatalogRequest::GetStock { product_id, respond_to } => {
                    self.handle_get_stock(product_id, respond_to);
                }
                CatalogRequest::PutProduct { product, stock, respond_to } => {
                    self.handle_put_product(product, stock, respond_to);
                }
                CatalogRequest::SetStock { product_id, stock, respond_to } => {
                    self.handle_set_stock(product_id, stock, respond_to);
                }
                CatalogRequest::Shutdown => {
                    info!("CatalogService shutting down");
                    break;
                }
            }
        }

        info!("CatalogService stopped");
    }

    #[instrument(skip(self, respond_to))]
    fn handle_get_product(&self, product_id: ProductId, respond_to: ServiceResponse<Option<Product>, LookupError>) {
        debug!("Processing get_product request");

        let product = self.products.get(&product_id).cloned();
        match &product {
            Some(product) => info!(product_name = %product.name, price = %product.price, "Product found"),
            None => debug!("Product not found"),
        }

        let _ = respond_to.send(Ok(product));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_get_stock(&self, product_id: ProductId, respond_to: ServiceResponse<Option<Stock>, LookupError>) {
        debug!("Processing get_stock request");

        let stock = self.stock.get(&product_id).map(|&amount| Stock::new(product_id, amount));
        match &stock {
            Some(stock) => info!(stock_level = stock.amount, "Stock checked"),
            None => debug!("No stock record"),
        }

        let _ = respond_to.send(Ok(stock));
    }

    #[instrument(fields(product_id = product.id, product_name = %product.name), skip(self, product, respond_to))]
    fn handle_put_product(&mut self, product: Product, stock: u32, respond_to: ServiceResponse<(), LookupError>) {
        debug!("Processing put_product request");

        let product_id = product.id;
        self.products.insert(product_id, product.with_amount(0));
        self.stock.insert(product_id, stock);
        info!("Product stored");

        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_set_stock(&mut self, product_id: ProductId, stock: u32, respond_to: ServiceResponse<(), LookupError>) {
        debug!("Processing set_stock request");

        let result = match self.stock.get_mut(&product_id) {
            Some(current) => {
                *current = stock;
                info!(stock_level = stock, "Stock updated");
                Ok(())
            }
            None => {
                error!("Product not found");
                Err(LookupError::NotFound(product_id))
            }
        };

        let _ = respond_to.send(result);
    }
}
