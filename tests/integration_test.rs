use order_fulfillment::clients::actor_client::ActorClient;
use order_fulfillment::fulfillment::{FulfillmentConfig, FulfillmentError};
use order_fulfillment::lifecycle::{setup_tracing, FulfillmentSystem};
use order_fulfillment::model::{Order, Product, Service};
use order_fulfillment::provider::{ProviderId, ServiceProvider};
use std::collections::BTreeSet;

fn apples() -> Product {
    Product::new(1, "apples", 1.0)
}

fn oranges() -> Product {
    Product::new(2, "oranges", 2.0)
}

fn plumbing() -> Service {
    Service::new(100, "plumbing", 40.0, 1)
}

fn plumbers(count: u32) -> Vec<ServiceProvider> {
    (1..=count)
        .map(|id| ServiceProvider::new(id, format!("plumber {id}"), [plumbing()]))
        .collect()
}

/// Full end-to-end test through the spawned actor.
#[tokio::test]
async fn test_full_fulfillment_system_integration() {
    setup_tracing();
    let system = FulfillmentSystem::from_config(
        FulfillmentConfig::default(),
        [apples(), oranges()],
        plumbers(2),
    )
    .expect("Failed to build system");
    let client = system.client.clone();

    let mut order = Order::new();
    order.add_to_order(apples(), 2).unwrap();
    order.add_to_order(oranges(), 1).unwrap();
    order.add_to_order(plumbing(), 1).unwrap();

    let placed = client.place_order(order).await.expect("Failed to place order");
    assert!(placed.is_completed());
    assert_eq!(placed.products_total(), 4.0);

    assert_eq!(client.stock_level(apples().item_number()).await, Ok(3));
    assert_eq!(client.stock_level(oranges().item_number()).await, Ok(4));
    let plumber = client.provider(ProviderId(1)).await.unwrap().expect("Provider not found");
    assert!(plumber.is_busy());

    // Only one plumber left idle.
    let mut greedy = Order::new();
    greedy.add_to_order(plumbing(), 2).unwrap();
    let result = client.place_order(greedy).await;
    assert!(matches!(
        result,
        Err(FulfillmentError::ServiceUnavailable(item)) if item == plumbing().item_number()
    ));

    let snapshot = client.snapshot().await.expect("Failed to take snapshot");
    assert_eq!(snapshot.orders_completed, 1);
    assert_eq!(snapshot.busy_providers.len(), 1);

    drop(client);
    let oms = system.shutdown().await.expect("Shutdown failed");
    assert_eq!(oms.orders_completed(), 1);
    assert_eq!(oms.warehouse().stock_level(apples().item_number()), 3);
}

#[tokio::test]
async fn test_catalog_changes_through_client() {
    let system = FulfillmentSystem::from_config(FulfillmentConfig::default(), [apples()], plumbers(1))
        .expect("Failed to build system");
    let client = &system.client;

    let pears = Product::new(3, "pears", 3.0);
    client.set_default_product_stock_level(pears.clone(), 9).await.unwrap();
    let added = client.add_new_products([apples(), pears.clone()]).await.unwrap();
    assert_eq!(added, BTreeSet::from([pears.clone()]));
    assert_eq!(client.stock_level(pears.item_number()).await, Ok(9));

    let electrician = Service::new(101, "electrics", 50.0, 2);
    let added = client
        .add_service_provider(ServiceProvider::new(2, "sparky", [electrician.clone()]))
        .await
        .unwrap();
    assert!(added);
    assert_eq!(
        client.offered_services().await.unwrap(),
        BTreeSet::from([plumbing(), electrician.clone()])
    );

    client.discontinue_item(electrician.clone()).await.unwrap();
    assert_eq!(client.offered_services().await.unwrap(), BTreeSet::from([plumbing()]));

    client.discontinue_item(apples()).await.unwrap();
    assert!(client.product_catalog().await.unwrap().contains(&apples()));

    let oms = system.shutdown().await.expect("Shutdown failed");
    assert!(!oms.warehouse().is_restockable(apples().item_number()));
}

/// Concurrent clients never book the same provider twice.
#[tokio::test]
async fn test_concurrent_orders_are_serialized() {
    let system = FulfillmentSystem::from_config(FulfillmentConfig::default(), [], plumbers(3))
        .expect("Failed to build system");

    let tasks: Vec<_> = (0..6)
        .map(|_| {
            let client = system.client.clone();
            tokio::spawn(async move {
                let mut order = Order::new();
                order.add_to_order(plumbing(), 1).unwrap();
                client.place_order(order).await
            })
        })
        .collect();

    let mut placed = 0;
    for task in tasks {
        if task.await.unwrap().is_ok() {
            placed += 1;
        }
    }

    // Each success advances every busy counter, but three orders are not enough to
    // release anyone, so exactly three orders found an idle plumber.
    assert_eq!(placed, 3);
    let oms = system.shutdown().await.expect("Shutdown failed");
    assert_eq!(oms.providers().filter(|p| p.is_busy()).count(), 3);
}

#[tokio::test]
async fn test_zero_mailbox_capacity_is_rejected() {
    let config = FulfillmentConfig {
        mailbox_capacity: 0,
        ..FulfillmentConfig::default()
    };

    let result = FulfillmentSystem::from_config(config, [apples()], plumbers(1));

    assert!(matches!(result, Err(FulfillmentError::InvalidConfig(_))));
}

#[tokio::test]
async fn test_zero_mailbox_capacity_is_raised_for_a_built_system() {
    let oms = order_fulfillment::fulfillment::OrderManagementSystem::new([apples()], 5, [])
        .expect("Failed to build system");
    let system = FulfillmentSystem::new(oms, 0);

    assert_eq!(system.client.stock_level(apples().item_number()).await, Ok(5));
    system.shutdown().await.expect("Shutdown failed");
}
