mod domain;
mod messages;
mod clients;
mod lookup;
mod storage;
mod notifier;

mod app_system;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;

mod cart_actor;
mod catalog_actor;

use std::sync::Arc;

use tracing::{debug, error, info, Instrument};
use crate::app_system::{setup_tracing, AppConfig, CartSystem};
use crate::domain::{Product, UpdateProductAmount};
use crate::notifier::{ChannelNotifier, Notifier, TracingNotifier};

/// Demo catalog used when no catalog API is configured.
fn demo_catalog() -> Vec<(Product, u32)> {
    vec![
        (Product::new(1, "Tênis de Caminhada Leve Confortável", 179.9, "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis1.jpg"), 3),
        (Product::new(2, "Tênis VR Caminhada Confortável Detalhes Couro Masculino", 139.9, "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis2.jpg"), 5),
        (Product::new(3, "Tênis Adidas Duramo Lite 2.0", 219.9, "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis3.jpg"), 1),
    ]
}

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = AppConfig::load().map_err(|e| e.to_string())?;
    info!(storage_dir = %config.storage_dir.display(), "Starting storefront cart");

    // Toasts are consumed off the service task and rendered as log lines
    let (notifier, mut toasts) = ChannelNotifier::new();
    let toast_task = tokio::spawn(async move {
        while let Some(message) = toasts.recv().await {
            TracingNotifier.error(&message);
        }
    });

    let system = CartSystem::from_config(&config, Arc::new(notifier)).map_err(|e| e.to_string())?;

    let mut snapshots = system.cart_client.subscribe();
    let render_task = tokio::spawn(async move {
        while snapshots.changed().await.is_ok() {
            let cart = snapshots.borrow_and_update().clone();
            if cart.is_empty() {
                debug!("Cart is empty");
            } else {
                info!(lines = cart.len(), total_items = cart.total_items(), subtotal = cart.subtotal(), "Cart changed");
            }
        }
    });

    if let Some(catalog) = &system.catalog_client {
        for (product, stock) in demo_catalog() {
            catalog.put_product(product, stock).await.map_err(|e| e.to_string())?;
        }
    }

    let cart = &system.cart_client;
    let span = tracing::info_span!("shopping_session");
    let session = async {
        cart.add_product(2).await?;
        cart.add_product(2).await?;
        cart.add_product(1).await?;
        cart.update_product_amount(UpdateProductAmount { product_id: 2, amount: 4 }).await?;
        // A single unit in stock is not enough to open a new line
        cart.add_product(3).await?;
        cart.remove_product(1).await
    }
    .instrument(span)
    .await;

    match session {
        Ok(cart) => {
            for line in cart.items() {
                info!(product_id = line.id, name = %line.name, amount = line.amount, "Cart line");
            }
            info!(total_items = cart.total_items(), subtotal = cart.subtotal(), "Session finished");
        }
        Err(e) => error!(error = %e, "Cart unavailable"),
    }

    system.shutdown().await?;
    // Both channels close once the services are gone
    let _ = render_task.await;
    let _ = toast_task.await;

    info!("Application completed successfully");
    Ok(())
}
