use thiserror::Error;
use crate::domain::ProductId;
use crate::lookup::LookupError;
use crate::storage::StorageError;

pub const MSG_OUT_OF_STOCK: &str = "Quantidade solicitada fora de estoque";
pub const MSG_ADD_FAILED: &str = "Erro na adição do produto";
pub const MSG_REMOVE_FAILED: &str = "Erro na remoção do produto";
pub const MSG_UPDATE_FAILED: &str = "Erro na alteração de quantidade do produto";

/// The cart mutation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
    Update,
}

impl CartOperation {
    fn failure_message(self) -> &'static str {
        match self {
            CartOperation::Add => MSG_ADD_FAILED,
            CartOperation::Remove => MSG_REMOVE_FAILED,
            CartOperation::Update => MSG_UPDATE_FAILED,
        }
    }
}

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Insufficient stock: requested {requested}, available {available}")]
    OutOfStock { requested: i64, available: u32 },
    #[error("Product not in cart: {0}")]
    NotInCart(ProductId),
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl CartError {
    /// The fixed text shown to the shopper when `operation` fails with this error.
    pub fn user_message(&self, operation: CartOperation) -> &'static str {
        match self {
            CartError::OutOfStock { .. } => MSG_OUT_OF_STOCK,
            _ => operation.failure_message(),
        }
    }
}
