//! # Order Actor
//!
//! Orders and their embedded line items. The actor runs with a
//! [`StockLedger`](crate::clients::StockLedger) as context, which the `on_create`
//! hook uses to reserve stock before the order is stored.
//!
//! Cancellation is driven by [`OrderClient::cancel_order`](crate::clients::OrderClient::cancel_order):
//! it claims the order with [`OrderAction::ClaimCancellation`], releases the stock
//! and deletes the order.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Order;
use docstore::{CollectionActor, CollectionClient};

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (CollectionActor<Order>, CollectionClient<Order>) {
    CollectionActor::new(buffer_size)
}
