#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::app_system::CartSystem;
    use crate::cart_actor::{MSG_ADD_FAILED, MSG_OUT_OF_STOCK, MSG_REMOVE_FAILED, MSG_UPDATE_FAILED};
    use crate::domain::{Cart, Product, ProductId, Stock, UpdateProductAmount};
    use crate::lookup::LookupError;
    use crate::mock_framework::{create_mock_catalog, expect_get_product, expect_get_stock, RecordingNotifier};
    use crate::storage::{CartRepository, MemoryStore, CART_STORAGE_KEY};

    fn shoe(id: ProductId) -> Product {
        Product::new(id, format!("Tênis {}", id), 139.9, format!("https://cdn.rocketshoes/{}.jpg", id))
    }

    fn amounts(cart: &Cart) -> Vec<(ProductId, u32)> {
        cart.items().iter().map(|p| (p.id, p.amount)).collect()
    }

    /// Starts a system with an in-process catalog holding `catalog` and a
    /// store pre-filled with `stored`.
    async fn start_system(
        catalog: &[(ProductId, u32)],
        stored: Vec<Product>,
    ) -> (CartSystem, RecordingNotifier, MemoryStore) {
        let store = MemoryStore::new();
        let repository = CartRepository::new(Arc::new(store.clone()), CART_STORAGE_KEY);
        if !stored.is_empty() {
            repository.save(&Cart::from_items(stored).unwrap()).unwrap();
        }

        let notifier = RecordingNotifier::new();
        let system = CartSystem::with_local_catalog(10, Arc::new(notifier.clone()), repository);
        let catalog_client = system.catalog_client.clone().unwrap();
        for &(id, stock) in catalog {
            catalog_client.put_product(shoe(id), stock).await.unwrap();
        }

        (system, notifier, store)
    }

    #[tokio::test]
    async fn test_adding_twice_increments() {
        let (system, notifier, _) = start_system(&[(1, 5)], vec![]).await;

        let cart = system.cart_client.add_product(1).await.unwrap();
        assert_eq!(amounts(&cart), vec![(1, 1)]);
        assert_eq!(cart.get(1).unwrap().name, "Tênis 1");

        let cart = system.cart_client.add_product(1).await.unwrap();
        assert_eq!(amounts(&cart), vec![(1, 2)]);
        assert!(notifier.messages().is_empty());

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_add_beyond_stock_is_rejected() {
        let (system, notifier, _) = start_system(&[(1, 5)], vec![shoe(1).with_amount(5)]).await;

        let cart = system.cart_client.add_product(1).await.unwrap();
        assert_eq!(amounts(&cart), vec![(1, 5)]);
        assert_eq!(notifier.messages(), vec![MSG_OUT_OF_STOCK]);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_update_to_zero_is_rejected() {
        let (system, notifier, _) = start_system(&[(2, 10)], vec![shoe(2).with_amount(3)]).await;

        let update = UpdateProductAmount { product_id: 2, amount: 0 };
        let cart = system.cart_client.update_product_amount(update).await.unwrap();
        assert_eq!(amounts(&cart), vec![(2, 3)]);
        assert_eq!(notifier.messages(), vec![MSG_UPDATE_FAILED]);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_update_to_exact_stock_is_rejected() {
        let (system, notifier, _) = start_system(&[(2, 4)], vec![shoe(2).with_amount(3)]).await;

        let update = UpdateProductAmount { product_id: 2, amount: 4 };
        let cart = system.cart_client.update_product_amount(update).await.unwrap();
        assert_eq!(amounts(&cart), vec![(2, 3)]);
        assert_eq!(notifier.messages(), vec![MSG_OUT_OF_STOCK]);

        let update = UpdateProductAmount { product_id: 2, amount: 1 };
        let cart = system.cart_client.update_product_amount(update).await.unwrap();
        assert_eq!(amounts(&cart), vec![(2, 1)]);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_removing_twice_reports_once() {
        let stored = vec![shoe(1).with_amount(1), shoe(2).with_amount(2)];
        let (system, notifier, store) = start_system(&[], stored).await;

        let cart = system.cart_client.remove_product(1).await.unwrap();
        assert_eq!(amounts(&cart), vec![(2, 2)]);
        assert!(notifier.messages().is_empty());

        let cart = system.cart_client.remove_product(1).await.unwrap();
        assert_eq!(amounts(&cart), vec![(2, 2)]);
        assert_eq!(notifier.messages(), vec![MSG_REMOVE_FAILED]);

        let reloaded = CartRepository::new(Arc::new(store), CART_STORAGE_KEY).load();
        assert_eq!(amounts(&reloaded), vec![(2, 2)]);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_unknown_product_reports_add_failure() {
        let (system, notifier, _) = start_system(&[], vec![]).await;

        let cart = system.cart_client.add_product(99).await.unwrap();
        assert!(cart.is_empty());
        assert_eq!(notifier.messages(), vec![MSG_ADD_FAILED]);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_cart_survives_restart() {
        let (system, _, store) = start_system(&[(1, 5), (2, 5)], vec![]).await;
        system.cart_client.add_product(2).await.unwrap();
        system.cart_client.add_product(1).await.unwrap();
        system.shutdown().await.unwrap();

        let repository = CartRepository::new(Arc::new(store), CART_STORAGE_KEY);
        let restarted = CartSystem::with_local_catalog(10, Arc::new(RecordingNotifier::new()), repository);
        let cart = restarted.cart_client.get_cart().await.unwrap();
        assert_eq!(amounts(&cart), vec![(2, 1), (1, 1)]);

        restarted.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_subscribers_see_committed_carts() {
        let (system, _, _) = start_system(&[(1, 5)], vec![]).await;
        let mut snapshots = system.cart_client.subscribe();
        assert!(snapshots.borrow_and_update().is_empty());

        system.cart_client.add_product(1).await.unwrap();
        snapshots.changed().await.unwrap();
        assert_eq!(amounts(&snapshots.borrow_and_update()), vec![(1, 1)]);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_applied_in_turn() {
        let (system, notifier, _) = start_system(&[(1, 3)], vec![]).await;

        let tasks: Vec<_> = (0..5)
            .map(|_| {
                let client = system.cart_client.clone();
                tokio::spawn(async move { client.add_product(1).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let cart = system.cart_client.get_cart().await.unwrap();
        assert_eq!(amounts(&cart), vec![(1, 3)]);
        assert_eq!(notifier.messages(), vec![MSG_OUT_OF_STOCK, MSG_OUT_OF_STOCK]);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_new_product_flow_against_mock_catalog() {
        let (catalog_client, mut catalog_rx) = create_mock_catalog(10);
        let notifier = RecordingNotifier::new();
        let repository = CartRepository::new(Arc::new(MemoryStore::new()), CART_STORAGE_KEY);
        let system = CartSystem::start(10, Arc::new(catalog_client), Arc::new(notifier.clone()), repository);

        // Stock of exactly one unit: rejected before product details are fetched
        let client = system.cart_client.clone();
        let add_task = tokio::spawn(async move { client.add_product(3).await });
        let (product_id, responder) = expect_get_stock(&mut catalog_rx).await.expect("Expected GetStock");
        assert_eq!(product_id, 3);
        responder.send(Ok(Some(Stock::new(3, 1)))).unwrap();
        assert!(add_task.await.unwrap().unwrap().is_empty());
        assert!(catalog_rx.try_recv().is_err());
        assert_eq!(notifier.messages(), vec![MSG_OUT_OF_STOCK]);

        // Transport failure
        let client = system.cart_client.clone();
        let add_task = tokio::spawn(async move { client.add_product(3).await });
        let (_, responder) = expect_get_stock(&mut catalog_rx).await.expect("Expected GetStock");
        responder.send(Err(LookupError::Transport("timeout".into()))).unwrap();
        assert!(add_task.await.unwrap().unwrap().is_empty());
        assert_eq!(notifier.messages(), vec![MSG_OUT_OF_STOCK, MSG_ADD_FAILED]);

        // Enough stock: stock then product details
        let client = system.cart_client.clone();
        let add_task = tokio::spawn(async move { client.add_product(3).await });
        let (_, responder) = expect_get_stock(&mut catalog_rx).await.expect("Expected GetStock");
        responder.send(Ok(Some(Stock::new(3, 5)))).unwrap();
        let (product_id, responder) = expect_get_product(&mut catalog_rx).await.expect("Expected GetProduct");
        assert_eq!(product_id, 3);
        responder.send(Ok(Some(shoe(3)))).unwrap();

        let cart = add_task.await.unwrap().unwrap();
        assert_eq!(amounts(&cart), vec![(3, 1)]);
        assert_eq!(notifier.messages().len(), 2);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_update_with_unreachable_catalog_keeps_cart() {
        let (catalog_client, mut catalog_rx) = create_mock_catalog(10);
        let notifier = RecordingNotifier::new();
        let repository = CartRepository::new(Arc::new(MemoryStore::new()), CART_STORAGE_KEY);
        repository.save(&Cart::from_items(vec![shoe(2).with_amount(1)]).unwrap()).unwrap();
        let system = CartSystem::start(10, Arc::new(catalog_client), Arc::new(notifier.clone()), repository);

        let client = system.cart_client.clone();
        let update_task = tokio::spawn(async move {
            client
                .update_product_amount(UpdateProductAmount { product_id: 2, amount: 2 })
                .await
        });
        let (product_id, responder) = expect_get_stock(&mut catalog_rx).await.expect("Expected GetStock");
        assert_eq!(product_id, 2);
        responder.send(Err(LookupError::Transport("timeout".into()))).unwrap();

        let cart = update_task.await.unwrap().unwrap();
        assert_eq!(amounts(&cart), vec![(2, 1)]);
        assert_eq!(notifier.messages(), vec![MSG_UPDATE_FAILED]);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_client_reports_stopped_service() {
        let (system, _, _) = start_system(&[], vec![]).await;
        let client = system.cart_client.clone();
        system.shutdown().await.unwrap();

        assert!(client.get_cart().await.is_err());
    }
}
