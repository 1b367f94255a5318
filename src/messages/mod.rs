use tokio::sync::oneshot;
use crate::cart_actor::CartError;
use crate::domain::{Cart, Product, ProductId, Stock, UpdateProductAmount};
use crate::lookup::LookupError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Requests handled by the cart service. Every mutation answers with the cart
/// as it stands after the request, whether or not the mutation was applied.
#[derive(Debug)]
pub enum CartRequest {
    GetCart {
        respond_to: ServiceResponse<Cart, CartError>,
    },
    AddProduct {
        product_id: ProductId,
        respond_to: ServiceResponse<Cart, CartError>,
    },
    RemoveProduct {
        product_id: ProductId,
        respond_to: ServiceResponse<Cart, CartError>,
    },
    UpdateProductAmount {
        update: UpdateProductAmount,
        respond_to: ServiceResponse<Cart, CartError>,
    },
    Shutdown,
}

/// Requests handled by the in-process catalog service.
#[derive(Debug)]
pub enum CatalogRequest {
    GetProduct {
        product_id: ProductId,
        respond_to: ServiceResponse<Option<Product>, LookupError>,
    },
    GetStock {
        product_id: ProductId,
        respond_to: ServiceResponse<Option<Stock>, LookupError>,
    },
    PutProduct {
        product: Product,
        stock: u32,
        respond_to: ServiceResponse<(), LookupError>,
    },
    SetStock {
        product_id: ProductId,
        stock: u32,
        respond_to: ServiceResponse<(), LookupError>,
    },
    Shutdown,
}
