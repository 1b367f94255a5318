use tokio::sync::{mpsc, watch};
use tracing::{debug, instrument};

use crate::cart_actor::CartError;
use crate::domain::{Cart, ProductId, UpdateProductAmount};
use crate::messages::CartRequest;

/// Shared handle to the cart store.
///
/// UI components hold clones of this client. Mutations resolve to the cart as
/// it stands afterwards; rejected mutations are reported through the
/// notifier, never as an `Err`. `Err` means the service is gone.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
    snapshots: watch::Receiver<Cart>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>, snapshots: watch::Receiver<Cart>) -> Self {
        Self { sender, snapshots }
    }

    /// Receives every committed cart, starting with the current one.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.snapshots.clone()
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CartError> {
        debug!("Sending shutdown");
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|_| CartError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(CartClient => fn get_cart() -> Cart as CartRequest::GetCart, Error = CartError);
client_method!(CartClient => fn add_product(product_id: ProductId) -> Cart as CartRequest::AddProduct, Error = CartError);
client_method!(CartClient => fn remove_product(product_id: ProductId) -> Cart as CartRequest::RemoveProduct, Error = CartError);
client_method!(CartClient => fn update_product_amount(update: UpdateProductAmount) -> Cart as CartRequest::UpdateProductAmount, Error = CartError);
