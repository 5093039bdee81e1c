//! # Order Client
//!
//! Provides a high‑level API for interacting with the `Order` actor.
//! It wraps a `CollectionClient<Order>` and handles the placement, cancellation
//! and listing workflows.
use crate::clients::StockLedger;
use crate::model::{
    LineItem, Order, OrderCreate, OrderId, OrderListParams, OrderSummary, OrderUpdate, UserId,
};
use crate::notify::OrderNotifier;
use crate::order_actor::{OrderAction, OrderError};
use async_trait::async_trait;
use docstore::{CollectionClient, Filter, Page, Query, Repository, StoreError};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Client for interacting with the Order actor.
///
/// Stock reservation happens in the Order actor's `on_create` hook; this client adds
/// the confirmation notice on top of it and drives cancellation.
#[derive(Clone)]
pub struct OrderClient {
    inner: CollectionClient<Order>,
    ledger: StockLedger,
    notifier: Arc<dyn OrderNotifier>,
    page_size: u32,
}

impl OrderClient {
    pub fn new(
        inner: CollectionClient<Order>,
        ledger: StockLedger,
        notifier: Arc<dyn OrderNotifier>,
        page_size: u32,
    ) -> Self {
        Self {
            inner,
            ledger,
            notifier,
            page_size,
        }
    }
}

#[async_trait]
impl Repository<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &CollectionClient<Order> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        OrderError::from(e)
    }
}

impl OrderClient {
    /// Places an order.
    ///
    /// Stock is reserved for every line item concurrently. If any item cannot be
    /// reserved the other reservations are released, no order is stored and
    /// [`OrderError::OutOfStock`] names the failing products. A failed confirmation
    /// notice is logged and does not affect the result.
    #[instrument(skip(self, params), fields(user = %params.user, items = params.items.len()))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!(?params, "Sending request");
        let order = self.inner.create(params).await?;
        info!(order = %order.id, "Order placed");

        if let Err(e) = self.notifier.order_created(&order.email, &order.items).await {
            warn!(order = %order.id, error = %e, "Order notification failed");
        }
        Ok(order)
    }

    /// Cancels an order, returning `items` to stock and deleting the order.
    ///
    /// The order is claimed first so two cancellations cannot both reverse stock. If
    /// any release fails the others are re-reserved, the claim is dropped and
    /// [`OrderError::ReversalFailed`] names the products. When a re-reservation
    /// fails too, the claim is kept and [`OrderError::CancellationStalled`] names
    /// the products whose stock stayed restored.
    #[instrument(skip(self, items), fields(items = items.len()))]
    pub async fn cancel_order(&self, id: OrderId, items: &[LineItem]) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::ClaimCancellation)
            .await?;

        if let Err(failure) = self.ledger.release_all(items).await {
            if !failure.is_compensated() {
                error!(
                    order = %id,
                    restored = ?failure.uncompensated,
                    "Cancellation stalled, order stays claimed"
                );
                return Err(OrderError::CancellationStalled {
                    order: id,
                    failed: failure.failed,
                    restored: failure.uncompensated,
                });
            }
            if let Err(e) = self
                .inner
                .perform_action(id, OrderAction::ReleaseCancellation)
                .await
            {
                error!(order = %id, error = %e, "Failed to release cancellation claim");
            }
            return Err(OrderError::ReversalFailed(failure.failed));
        }

        let order = self.inner.delete(id).await?;
        info!(order = %id, "Order cancelled");
        Ok(order)
    }

    /// Lists orders matching `params`, projected to [`OrderSummary`].
    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        params: &OrderListParams,
    ) -> Result<Page<OrderSummary>, OrderError> {
        debug!("Sending request");
        let filter = Filter::new()
            .one_of("user", params.users.iter().copied())
            .one_of("product", params.products.iter().copied())
            .one_of("status", params.statuses.iter().copied())
            .search(&["email"], params.list.search_text());
        let query = Query::new(filter)
            .sorted(params.list.sort())
            .paginate(params.list.pagination(self.page_size));
        Ok(self.inner.find(query).await?.map(OrderSummary::from))
    }

    /// [`list_orders`](Self::list_orders) restricted to one user's orders.
    pub async fn list_my_orders(
        &self,
        user: UserId,
        params: &OrderListParams,
    ) -> Result<Page<OrderSummary>, OrderError> {
        let params = OrderListParams {
            users: vec![user],
            ..params.clone()
        };
        self.list_orders(&params).await
    }

    pub async fn order_details(&self, id: OrderId) -> Result<Order, OrderError> {
        self.fetch(id).await
    }

    #[instrument(skip(self))]
    pub async fn update_order(&self, id: OrderId, update: OrderUpdate) -> Result<Order, OrderError> {
        debug!("Sending request");
        Ok(self.inner.update(id, update).await?)
    }
}
