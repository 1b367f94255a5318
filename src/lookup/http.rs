use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{LookupError, StockLookup};
use crate::domain::{Product, ProductId, Stock};

/// REST client for the storefront catalog API.
///
/// Expects `GET {base}/stock/{id}` and `GET {base}/products/{id}`.
#[derive(Clone)]
pub struct HttpStockLookup {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStockLookup {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    async fn fetch<T: DeserializeOwned>(&self, resource: &str, product_id: ProductId) -> Result<T, LookupError> {
        let url = format!("{}/{}/{}", self.base_url, resource, product_id);
        debug!(%url, "Sending request");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(product_id));
        }
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))
    }
}

#[async_trait]
impl StockLookup for HttpStockLookup {
    #[instrument(skip(self))]
    async fn get_stock(&self, product_id: ProductId) -> Result<Stock, LookupError> {
        self.fetch("stock", product_id).await
    }

    #[instrument(skip(self))]
    async fn get_product(&self, product_id: ProductId) -> Result<Product, LookupError> {
        self.fetch("products", product_id).await
    }
}
