//! # Product Actor
//!
//! The catalog collection and the owner of all stock counters.
//!
//! - [`entity`] - [`Document`](docstore::Document) implementation for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`actions`] - [`ProductAction`] / [`ProductActionResult`]
//!
//! Stock only moves through `ReserveStock` and `ReleaseStock`. Because the actor
//! handles one request at a time, the check-and-decrement in `ReserveStock` cannot
//! interleave with another order for the same product.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Product;
use docstore::{CollectionActor, CollectionClient};

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (CollectionActor<Product>, CollectionClient<Product>) {
    CollectionActor::new(buffer_size)
}
