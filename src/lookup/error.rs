use thiserror::Error;
use crate::domain::ProductId;

/// Failures while asking the catalog for stock or product details.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LookupError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),
    #[error("Catalog transport error: {0}")]
    Transport(String),
    #[error("Catalog responded with status {0}")]
    Status(u16),
    #[error("Catalog response could not be decoded: {0}")]
    Decode(String),
    #[error("Catalog returned product {received} for request {requested}")]
    UnexpectedProduct { requested: ProductId, received: ProductId },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LookupError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            LookupError::Status(status.as_u16())
        } else {
            LookupError::Transport(err.to_string())
        }
    }
}
