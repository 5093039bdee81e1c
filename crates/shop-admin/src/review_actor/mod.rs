//! # Review Actor
//!
//! Star ratings (1 to 5) left by users on products. Reviews have no custom actions.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Review;
use docstore::{CollectionActor, CollectionClient};

/// Creates a new Review actor and its client.
pub fn new(buffer_size: usize) -> (CollectionActor<Review>, CollectionClient<Review>) {
    CollectionActor::new(buffer_size)
}
