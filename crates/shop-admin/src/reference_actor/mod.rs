//! # Reference Actors
//!
//! Cities, product types and payment types. Each is its own collection with a
//! unique name; they share one error type and one `Document` implementation.

pub mod entity;
pub mod error;

pub use error::*;

use docstore::{CollectionActor, CollectionClient, Document};

/// Creates a new reference-data actor and its client.
pub fn new<T>(buffer_size: usize) -> (CollectionActor<T>, CollectionClient<T>)
where
    T: Document<Error = ReferenceError>,
{
    CollectionActor::new(buffer_size)
}
