//! # Shop Admin Demo
//!
//! Starts the [`ShopSystem`], seeds reference data, a customer and two products,
//! then walks through the order workflows:
//! 1. place an order and an order that runs out of stock
//! 2. list orders, newest first
//! 3. cancel the first order
//! 4. run one discount-expiry sweep
//!
//! Configuration comes from the environment (or a `.env` file); see
//! [`ShopConfig::from_env`].

use chrono::{Duration, Utc};
use shop_admin::config::ShopConfig;
use shop_admin::lifecycle::{setup_tracing, ShopSystem};
use shop_admin::model::{
    LineItem, ListParams, OrderCreate, OrderListParams, ProductCreate, ReferenceCreate,
    ShippingAddress, UserCreate,
};
use shop_admin::response::ApiResponse;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = ShopConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting shop admin");

    let system = ShopSystem::start(&config);

    // Reference data
    let city = system
        .cities
        .create_city(ReferenceCreate::new("Hanoi"))
        .await
        .map_err(|e| e.to_string())?;
    let keyboards = system
        .product_types
        .create_product_type(ReferenceCreate::new("Keyboards"))
        .await
        .map_err(|e| e.to_string())?;
    let cash = system
        .payment_types
        .create_payment_type(ReferenceCreate::new("Cash on delivery"))
        .await
        .map_err(|e| e.to_string())?;

    // Customer and catalog
    let user = system
        .users
        .create_user(UserCreate {
            city: Some(city.id),
            ..UserCreate::new("alice@example.com", "Alice", "Smith")
        })
        .await
        .map_err(|e| e.to_string())?;

    let mechanical = system
        .products
        .create_product(ProductCreate {
            name: "Mechanical Keyboard".to_string(),
            slug: "mechanical-keyboard".to_string(),
            product_type: keyboards.id,
            price: 120.0,
            count_in_stock: 5,
            discount: Some(10),
            discount_start_date: Some(Utc::now() - Duration::days(7)),
            discount_end_date: Some(Utc::now() - Duration::hours(1)),
            ..Default::default()
        })
        .await
        .map_err(|e| e.to_string())?;
    let keycaps = system
        .products
        .create_product(ProductCreate {
            name: "Keycap Set".to_string(),
            slug: "keycap-set".to_string(),
            product_type: keyboards.id,
            price: 5.0,
            count_in_stock: 2,
            ..Default::default()
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(user = %user.id, products = 2, "Seed data created");

    let order_for = |items: Vec<LineItem>| {
        let items_price = items.iter().map(LineItem::subtotal).sum::<f64>();
        OrderCreate {
            items,
            shipping_address: ShippingAddress {
                full_name: user.full_name(),
                address: "1 Trang Tien".to_string(),
                city: city.id,
                phone: "0900000000".to_string(),
            },
            payment_method: cash.id,
            items_price,
            shipping_price: 3.0,
            total_price: items_price + 3.0,
            user: user.id,
            email: user.email.clone(),
            ..Default::default()
        }
    };

    // Order processing
    let first_items = vec![
        LineItem::new(mechanical.id, &mechanical.name, 1, mechanical.effective_price()),
        LineItem::new(keycaps.id, &keycaps.name, 2, keycaps.price),
    ];
    let span = tracing::info_span!("order_processing");
    let placed = async { system.orders.place_order(order_for(first_items.clone())).await }
        .instrument(span)
        .await;
    let placed_response = ApiResponse::completed(placed.clone(), "Success");
    info!(
        status = placed_response.status,
        message = %placed_response.message,
        "Place order"
    );

    let too_many = vec![LineItem::new(keycaps.id, &keycaps.name, 1, keycaps.price)];
    let rejected = ApiResponse::completed(
        system.orders.place_order(order_for(too_many)).await,
        "Success",
    );
    info!(
        status = rejected.status,
        message = %rejected.message,
        "Place order with no stock left"
    );

    // Listing
    let params = OrderListParams {
        list: ListParams {
            order: Some("createdAt desc".to_string()),
            ..Default::default()
        },
        ..Default::default()
    };
    let listing = system
        .orders
        .list_my_orders(user.id, &params)
        .await
        .map_err(|e| e.to_string())?;
    info!(
        total = listing.total_count,
        pages = listing.total_page,
        "Listed orders"
    );

    // Cancellation
    if let Ok(order) = placed {
        let cancelled = system
            .orders
            .cancel_order(order.id, &order.items)
            .await
            .map_err(|e| e.to_string())?;
        let stock = system
            .products
            .product_details(keycaps.id)
            .await
            .map_err(|e| e.to_string())?;
        info!(
            order = %cancelled.id,
            count_in_stock = stock.count_in_stock,
            sold = stock.sold,
            "Order cancelled and stock restored"
        );
    }

    // Scheduled job body
    let expired = system
        .products
        .expire_discounts(Utc::now())
        .await
        .map_err(|e| e.to_string())?;
    info!(expired, "Discount sweep finished");

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
