use std::sync::Arc;

use tracing::{error, info, instrument};

use super::AppConfig;
use crate::cart_actor::CartService;
use crate::catalog_actor::CatalogService;
use crate::clients::{CartClient, CatalogClient};
use crate::lookup::{HttpStockLookup, LookupError, StockLookup};
use crate::notifier::Notifier;
use crate::storage::{CartRepository, FileStore};

/// Starts the cart store and its collaborators, and shuts them down in
/// dependency order.
pub struct CartSystem {
    pub cart_client: CartClient,
    /// Present when the system runs its own catalog.
    pub catalog_client: Option<CatalogClient>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CartSystem {
    /// Starts the cart store against the given collaborators.
    #[instrument(name = "cart_system", skip_all)]
    pub fn start(
        buffer_size: usize,
        lookup: Arc<dyn StockLookup>,
        notifier: Arc<dyn Notifier>,
        repository: CartRepository,
    ) -> Self {
        info!(storage_key = %repository.key(), "Starting cart system");

        let (cart_service, cart_client) = CartService::new(buffer_size, lookup, notifier, repository);
        let handles = vec![tokio::spawn(cart_service.run())];

        info!("Cart system started");
        Self {
            cart_client,
            catalog_client: None,
            handles,
        }
    }

    /// Starts an in-process catalog first, then the cart store wired to it.
    #[instrument(name = "cart_system", skip_all)]
    pub fn with_local_catalog(buffer_size: usize, notifier: Arc<dyn Notifier>, repository: CartRepository) -> Self {
        info!("Starting in-process catalog");
        let (catalog_service, catalog_client) = CatalogService::new(buffer_size);
        let catalog_handle = tokio::spawn(catalog_service.run());

        let mut system = Self::start(buffer_size, Arc::new(catalog_client.clone()), notifier, repository);
        system.catalog_client = Some(catalog_client);
        system.handles.push(catalog_handle);
        system
    }

    /// Builds the system described by `config`: file-backed storage plus
    /// either the remote catalog API or the in-process catalog.
    pub fn from_config(config: &AppConfig, notifier: Arc<dyn Notifier>) -> Result<Self, LookupError> {
        let store = FileStore::new(&config.storage_dir);
        let repository = CartRepository::new(Arc::new(store), config.storage_key.clone());

        match &config.api_base_url {
            Some(base_url) => {
                info!(%base_url, "Using catalog API");
                let lookup = HttpStockLookup::new(base_url.as_str(), config.request_timeout())?;
                Ok(Self::start(config.channel_buffer, Arc::new(lookup), notifier, repository))
            }
            None => Ok(Self::with_local_catalog(config.channel_buffer, notifier, repository)),
        }
    }

    /// Stops the cart store, then the catalog, and waits for both.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down cart system");

        let _ = self.cart_client.shutdown().await;
        if let Some(catalog_client) = &self.catalog_client {
            let _ = catalog_client.shutdown().await;
        }

        let mut failed = None;
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
                failed = Some(format!("Service task failed: {:?}", e));
            }
        }

        info!("Cart system shutdown complete");
        failed.map_or(Ok(()), Err)
    }
}
