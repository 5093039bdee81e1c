//! # User Actor
//!
//! Accounts with a unique email, profile updates that cannot touch email or status,
//! and the user side of product likes.
//!
//! - [`entity`] - [`Document`](docstore::Document) implementation for [`User`]
//! - [`error`] - [`UserError`]
//! - [`actions`] - [`UserAction`] (like / unlike)

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::User;
use docstore::{CollectionActor, CollectionClient};

/// Creates a new User actor and its client.
pub fn new(buffer_size: usize) -> (CollectionActor<User>, CollectionClient<User>) {
    CollectionActor::new(buffer_size)
}
