use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, instrument, warn};

use super::{CartError, CartOperation};
use crate::clients::CartClient;
use crate::domain::{Cart, ProductId, UpdateProductAmount};
use crate::lookup::{LookupError, StockLookup};
use crate::messages::{CartRequest, ServiceResponse};
use crate::notifier::Notifier;
use crate::storage::CartRepository;

/// Owns the cart and applies requests one at a time.
///
/// Each handler awaits its stock lookups before the next request is read, so
/// concurrent callers never compute an update from a stale cart. Failures are
/// reported through the [`Notifier`]; callers only receive the resulting cart.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    cart: Cart,
    lookup: Arc<dyn StockLookup>,
    notifier: Arc<dyn Notifier>,
    repository: CartRepository,
    snapshots: watch::Sender<Cart>,
}

impl CartService {
    /// Creates the service with the cart found in `repository`.
    pub fn new(
        buffer_size: usize,
        lookup: Arc<dyn StockLookup>,
        notifier: Arc<dyn Notifier>,
        repository: CartRepository,
    ) -> (Self, CartClient) {
        let cart = repository.load();
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (snapshots, subscriber) = watch::channel(cart.clone());
        let service = Self {
            receiver,
            cart,
            lookup,
            notifier,
            repository,
            snapshots,
        };
        let client = CartClient::new(sender, subscriber);
        (service, client)
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!(lines = self.cart.len(), "CartService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::GetCart { respond_to } => {
                    let _ = respond_to.send(Ok(self.cart.clone()));
                }
                CartRequest::AddProduct { product_id, respond_to } => {
                    self.handle_add_product(product_id, respond_to).await;
                }
                CartRequest::RemoveProduct { product_id, respond_to } => {
                    self.handle_remove_product(product_id, respond_to);
                }
                CartRequest::UpdateProductAmount { update, respond_to } => {
                    self.handle_update_product_amount(update, respond_to).await;
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }
        info!("CartService stopped");
    }

    #[instrument(skip(self, respond_to))]
    async fn handle_add_product(&mut self, product_id: ProductId, respond_to: ServiceResponse<Cart, CartError>) {
        debug!("Processing add_product request");
        let result = self.add_product(product_id).await;
        self.respond(CartOperation::Add, result, respond_to);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_remove_product(&mut self, product_id: ProductId, respond_to: ServiceResponse<Cart, CartError>) {
        debug!("Processing remove_product request");
        let result = self.remove_product(product_id);
        self.respond(CartOperation::Remove, result, respond_to);
    }

    #[instrument(fields(product_id = %update.product_id, amount = update.amount), skip(self, update, respond_to))]
    async fn handle_update_product_amount(
        &mut self,
        update: UpdateProductAmount,
        respond_to: ServiceResponse<Cart, CartError>,
    ) {
        debug!("Processing update_product_amount request");
        let result = self.update_product_amount(update).await;
        self.respond(CartOperation::Update, result, respond_to);
    }

    fn respond(
        &self,
        operation: CartOperation,
        result: Result<(), CartError>,
        respond_to: ServiceResponse<Cart, CartError>,
    ) {
        if let Err(e) = result {
            match &e {
                CartError::Lookup(_) | CartError::Storage(_) => {
                    error!(error = %e, ?operation, "Cart operation failed")
                }
                _ => warn!(error = %e, ?operation, "Cart operation rejected"),
            }
            self.notifier.error(e.user_message(operation));
        }
        let _ = respond_to.send(Ok(self.cart.clone()));
    }

    /// Adds one unit of `product_id`.
    ///
    /// An existing line needs more stock than its current amount. A new line
    /// needs more than one unit in stock.
    pub(crate) async fn add_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let stock = self.lookup.get_stock(product_id).await?;
        let mut updated = self.cart.clone();

        match self.cart.get(product_id) {
            Some(existing) => {
                if stock.amount <= existing.amount {
                    return Err(CartError::OutOfStock {
                        requested: i64::from(existing.amount) + 1,
                        available: stock.amount,
                    });
                }
                updated.increment(product_id);
            }
            None => {
                if stock.amount <= 1 {
                    return Err(CartError::OutOfStock { requested: 1, available: stock.amount });
                }
                let product = self.lookup.get_product(product_id).await?;
                if product.id != product_id {
                    return Err(LookupError::UnexpectedProduct {
                        requested: product_id,
                        received: product.id,
                    }
                    .into());
                }
                updated.push_new(product);
            }
        }

        self.commit(updated)
    }

    pub(crate) fn remove_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let mut updated = self.cart.clone();
        updated.remove(product_id).ok_or(CartError::NotInCart(product_id))?;
        self.commit(updated)
    }

    /// Sets a line's quantity. The requested amount must stay strictly below
    /// the available stock. An id with no line leaves the cart as it is.
    pub(crate) async fn update_product_amount(&mut self, update: UpdateProductAmount) -> Result<(), CartError> {
        let UpdateProductAmount { product_id, amount } = update;
        if amount < 1 {
            return Err(CartError::InvalidAmount(amount));
        }

        let stock = self.lookup.get_stock(product_id).await?;
        if i64::from(stock.amount) <= amount {
            return Err(CartError::OutOfStock { requested: amount, available: stock.amount });
        }

        // amount < stock.amount <= u32::MAX
        let amount = amount as u32;
        let mut updated = self.cart.clone();
        if !updated.set_amount(product_id, amount) {
            debug!("Product not in cart, nothing to update");
        }
        self.commit(updated)
    }

    /// Persists `updated`, then makes it the current cart.
    fn commit(&mut self, updated: Cart) -> Result<(), CartError> {
        self.repository.save(&updated)?;
        self.cart = updated;
        self.snapshots.send_replace(self.cart.clone());
        info!(lines = self.cart.len(), total_items = self.cart.total_items(), "Cart updated");
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn cart(&self) -> &Cart {
        &self.cart
    }
}
