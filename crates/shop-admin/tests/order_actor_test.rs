use chrono::Utc;
use docstore::mock::MockCollection;
use docstore::{Repository, StoreError};
use shop_admin::clients::{OrderClient, StockLedger};
use shop_admin::model::{
    LineItem, OrderCreate, OrderStatus, OrderUpdate, Product, ProductId, UserId,
};
use shop_admin::notify::LogNotifier;
use shop_admin::order_actor::{OrderAction, OrderError};
use shop_admin::product_actor::{ProductActionResult, ProductError};
use std::sync::Arc;

fn product(id: u32, count_in_stock: u32, sold: u32) -> Product {
    let now = Utc::now();
    Product {
        id: ProductId(id),
        name: format!("Product {id}"),
        slug: format!("product-{id}"),
        image: String::new(),
        product_type: Default::default(),
        price: 10.0,
        count_in_stock,
        sold,
        description: String::new(),
        discount: 0,
        discount_start_date: None,
        discount_end_date: None,
        liked_by: Vec::new(),
        total_likes: 0,
        created_at: now,
        updated_at: now,
    }
}

fn order_params(items: Vec<LineItem>) -> OrderCreate {
    OrderCreate {
        items,
        user: UserId(1),
        email: "alice@example.com".to_string(),
        is_paid: true,
        ..Default::default()
    }
}

/// Real Order actor with a mocked product collection behind its stock ledger.
/// Exercises the placement logic in `Order::on_create` without a Product actor.
#[tokio::test]
async fn test_order_actor_with_mocked_products() {
    let mut products = MockCollection::<Product>::new();
    products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::ReserveStock(product(1, 2, 3)));
    products
        .expect_action(ProductId(2))
        .return_ok(ProductActionResult::ReserveStock(product(2, 9, 1)));

    let ledger = StockLedger::new(products.client());
    let (order_actor, order_store) = shop_admin::order_actor::new(10);
    let orders = OrderClient::new(
        order_store,
        ledger.clone(),
        Arc::new(LogNotifier::new("no-reply@shop.local")),
        10,
    );
    let actor_handle = tokio::spawn(order_actor.run(ledger));

    let items = vec![
        LineItem::new(ProductId(1), "Product 1", 3, 10.0),
        LineItem::new(ProductId(2), "Product 2", 1, 10.0),
    ];
    let order = orders
        .place_order(order_params(items.clone()))
        .await
        .expect("Order placement failed");

    assert_eq!(order.items, items);
    assert_eq!(order.status, OrderStatus::WaitDelivery);
    assert!(order.paid_at.is_some());

    let stored = orders.get(order.id).await.unwrap();
    assert_eq!(stored, Some(order));

    products.verify();

    drop(orders);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_single_shortage_rejects_order_and_releases_the_rest() {
    let mut products = MockCollection::<Product>::new();
    products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::ReserveStock(product(1, 0, 5)));
    products
        .expect_action(ProductId(2))
        .return_err(StoreError::document(ProductError::InsufficientStock {
            product: ProductId(2),
            requested: 10,
            available: 5,
        }));
    products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::ReleaseStock(product(1, 5, 0)));

    let ledger = StockLedger::new(products.client());
    let (order_actor, order_store) = shop_admin::order_actor::new(10);
    let orders = OrderClient::new(
        order_store,
        ledger.clone(),
        Arc::new(LogNotifier::new("no-reply@shop.local")),
        10,
    );
    let actor_handle = tokio::spawn(order_actor.run(ledger));

    let result = orders
        .place_order(order_params(vec![
            LineItem::new(ProductId(1), "Product 1", 5, 10.0),
            LineItem::new(ProductId(2), "Product 2", 10, 10.0),
        ]))
        .await;

    let err = result.unwrap_err();
    assert_eq!(err, OrderError::OutOfStock(vec![ProductId(2)]));
    assert_eq!(err.to_string(), "The product with id: product_2 out of the stock");

    let page = orders.list_orders(&Default::default()).await.unwrap();
    assert_eq!(page.total_count, 0);

    products.verify();

    drop(orders);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_zero_amount_rejected_before_touching_stock() {
    let products = MockCollection::<Product>::new();
    let ledger = StockLedger::new(products.client());
    let (order_actor, order_store) = shop_admin::order_actor::new(10);
    let orders = OrderClient::new(
        order_store,
        ledger.clone(),
        Arc::new(LogNotifier::new("no-reply@shop.local")),
        10,
    );
    let actor_handle = tokio::spawn(order_actor.run(ledger));

    let result = orders
        .place_order(order_params(vec![LineItem::new(ProductId(1), "Product 1", 0, 10.0)]))
        .await;
    assert!(matches!(result, Err(OrderError::ValidationError(_))));

    products.verify();

    drop(orders);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_claimed_order_rejects_updates_and_second_claim() {
    let mut products = MockCollection::<Product>::new();
    products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::ReserveStock(product(1, 4, 1)));

    let ledger = StockLedger::new(products.client());
    let (order_actor, order_store) = shop_admin::order_actor::new(10);
    let orders = OrderClient::new(
        order_store,
        ledger.clone(),
        Arc::new(LogNotifier::new("no-reply@shop.local")),
        10,
    );
    let actor_handle = tokio::spawn(order_actor.run(ledger));

    let order = orders
        .place_order(order_params(vec![LineItem::new(ProductId(1), "Product 1", 1, 10.0)]))
        .await
        .unwrap();

    orders
        .inner()
        .perform_action(order.id, OrderAction::ClaimCancellation)
        .await
        .unwrap();

    let update = OrderUpdate {
        status: Some(OrderStatus::Done),
        ..Default::default()
    };
    assert_eq!(
        orders.update_order(order.id, update).await,
        Err(OrderError::CancellationInProgress(order.id))
    );
    // The claim fails before any stock is touched.
    assert_eq!(
        orders.cancel_order(order.id, &order.items).await,
        Err(OrderError::CancellationInProgress(order.id))
    );

    orders
        .inner()
        .perform_action(order.id, OrderAction::ReleaseCancellation)
        .await
        .unwrap();
    let update = OrderUpdate {
        status: Some(OrderStatus::Done),
        ..Default::default()
    };
    let updated = orders.update_order(order.id, update).await.unwrap();
    assert_eq!(updated.status, OrderStatus::Done);

    products.verify();

    drop(orders);
    actor_handle.await.unwrap();
}
