//! The cart store: an actor that owns the cart and applies stock-checked mutations.

mod error;
pub mod service;

pub use error::*;
pub use service::CartService;
