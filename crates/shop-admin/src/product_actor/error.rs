//! Error types for the Product actor.

use crate::model::{ProductId, UserId};
use crate::response::{ApiError, ErrorKind};
use crate::user_actor::UserError;
use docstore::StoreError;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Another product already uses this slug.
    #[error("The slug {0} is already in use")]
    AlreadyExists(String),

    /// The product data provided is invalid.
    #[error("Product validation error: {0}")]
    ValidationError(String),

    /// Stock movements must move at least one unit.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock {
        product: ProductId,
        requested: u32,
        available: u32,
    },

    /// Releasing more units than were ever sold.
    #[error("Cannot release {requested} units of {product}: only {sold} sold")]
    ReleaseExceedsSold {
        product: ProductId,
        requested: u32,
        sold: u32,
    },

    #[error("Product {product} is already liked by {user}")]
    AlreadyLiked { product: ProductId, user: UserId },

    #[error("Product {product} is not liked by {user}")]
    NotLiked { product: ProductId, user: UserId },

    /// The user side of a like failed.
    #[error(transparent)]
    User(#[from] UserError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ProductError {
    fn from(msg: String) -> Self {
        ProductError::ActorCommunicationError(msg)
    }
}

/// Lifts a store failure into the collection's error: missing documents and unique
/// index conflicts get their own variants, document errors are unwrapped.
impl From<StoreError> for ProductError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ProductError::NotFound(id),
            StoreError::Duplicate { value, .. } => ProductError::AlreadyExists(value),
            other => other
                .downcast::<ProductError>()
                .unwrap_or_else(|e| e.to_string().into()),
        }
    }
}

impl ApiError for ProductError {
    fn kind(&self) -> ErrorKind {
        match self {
            ProductError::NotFound(_) => ErrorKind::NotFound,
            ProductError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            ProductError::InsufficientStock { .. } => ErrorKind::OutOfStock,
            ProductError::ValidationError(_)
            | ProductError::InvalidQuantity(_)
            | ProductError::ReleaseExceedsSold { .. }
            | ProductError::AlreadyLiked { .. }
            | ProductError::NotLiked { .. } => ErrorKind::Invalid,
            ProductError::User(inner) => inner.kind(),
            ProductError::ActorCommunicationError(_) => ErrorKind::Internal,
        }
    }
}
