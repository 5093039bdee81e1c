use crate::clients::{
    CityClient, OrderClient, PaymentTypeClient, ProductClient, ProductTypeClient, ReviewClient,
    StockLedger, UserClient,
};
use crate::config::ShopConfig;
use crate::model::{City, PaymentType, ProductType};
use crate::notify::{LogNotifier, OrderNotifier};
use std::sync::Arc;
use tracing::{error, info};

/// The runtime that owns every collection actor.
///
/// `ShopSystem` is responsible for:
/// - **Lifecycle Management**: starting every actor and stopping them on shutdown
/// - **Dependency Wiring**: the Order actor runs with a [`StockLedger`] over the
///   product collection; the product client reaches users and reviews
///
/// # Example
///
/// ```ignore
/// let system = ShopSystem::start(&ShopConfig::default());
///
/// let user = system.users.create_user(user_data).await?;
/// let product = system.products.create_product(product_data).await?;
/// let order = system.orders.place_order(order_data).await?;
///
/// system.shutdown().await?;
/// ```
pub struct ShopSystem {
    pub users: UserClient,
    pub products: ProductClient,
    pub orders: OrderClient,
    pub reviews: ReviewClient,
    pub cities: CityClient,
    pub product_types: ProductTypeClient,
    pub payment_types: PaymentTypeClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl ShopSystem {
    /// Starts every actor with the default [`LogNotifier`] for order confirmations.
    pub fn start(config: &ShopConfig) -> Self {
        let notifier = Arc::new(LogNotifier::new(config.notify_sender.clone()));
        Self::with_notifier(config, notifier)
    }

    /// Starts every actor, sending order confirmations to `notifier`.
    pub fn with_notifier(config: &ShopConfig, notifier: Arc<dyn OrderNotifier>) -> Self {
        let capacity = config.mailbox_capacity;
        let page_size = config.default_page_size;

        // 1. Create actors (no dependencies)
        let (user_actor, user_store) = crate::user_actor::new(capacity);
        let (product_actor, product_store) = crate::product_actor::new(capacity);
        let (order_actor, order_store) = crate::order_actor::new(capacity);
        let (review_actor, review_store) = crate::review_actor::new(capacity);
        let (city_actor, city_store) = crate::reference_actor::new::<City>(capacity);
        let (product_type_actor, product_type_store) =
            crate::reference_actor::new::<ProductType>(capacity);
        let (payment_type_actor, payment_type_store) =
            crate::reference_actor::new::<PaymentType>(capacity);

        // 2. Start actors with injected context
        let ledger = StockLedger::new(product_store.clone());
        let handles = vec![
            tokio::spawn(user_actor.run(())),
            tokio::spawn(product_actor.run(())),
            tokio::spawn(order_actor.run(ledger.clone())),
            tokio::spawn(review_actor.run(())),
            tokio::spawn(city_actor.run(())),
            tokio::spawn(product_type_actor.run(())),
            tokio::spawn(payment_type_actor.run(())),
        ];

        // 3. Wrap the raw handles in domain clients
        let users = UserClient::new(user_store, page_size);
        let reviews = ReviewClient::new(review_store, page_size);
        let product_types = ProductTypeClient::new(product_type_store, page_size);
        let products = ProductClient::new(
            product_store,
            users.clone(),
            reviews.clone(),
            product_types.clone(),
            page_size,
        );
        let orders = OrderClient::new(order_store, ledger, notifier, page_size);

        info!(capacity, page_size, "Shop system started");
        Self {
            users,
            products,
            orders,
            reviews,
            cities: CityClient::new(city_store, page_size),
            product_types,
            payment_types: PaymentTypeClient::new(payment_type_store, page_size),
            handles,
        }
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping the clients closes the request channels. The order actor's ledger
    /// holds a product handle, so the product actor stops only after the order actor
    /// has drained; the dependency graph is acyclic, so every actor terminates.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if all actors shut down cleanly
    /// - `Err(String)` if any actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // Step 1: close all channels by dropping clients
        drop(self.orders);
        drop(self.products);
        drop(self.users);
        drop(self.reviews);
        drop(self.cities);
        drop(self.product_types);
        drop(self.payment_types);

        // Step 2: wait for all actor tasks to complete
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
