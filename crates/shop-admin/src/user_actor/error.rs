//! Error types for the User actor.

use crate::model::{ProductId, UserId};
use crate::response::{ApiError, ErrorKind};
use docstore::StoreError;
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// The requested user was not found.
    #[error("User not found: {0}")]
    NotFound(String),

    /// Another account already uses this email.
    #[error("The email {0} is already registered")]
    AlreadyExists(String),

    /// The user data provided is invalid.
    #[error("User validation error: {0}")]
    ValidationError(String),

    /// Email and status cannot be changed through a profile update.
    #[error("You can't change your {0}")]
    ImmutableField(&'static str),

    #[error("User {user} already likes {product}")]
    AlreadyLiked { user: UserId, product: ProductId },

    #[error("User {user} does not like {product}")]
    NotLiked { user: UserId, product: ProductId },

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for UserError {
    fn from(msg: String) -> Self {
        UserError::ActorCommunicationError(msg)
    }
}

/// Lifts a store failure into the collection's error: missing documents and unique
/// index conflicts get their own variants, document errors are unwrapped.
impl From<StoreError> for UserError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => UserError::NotFound(id),
            StoreError::Duplicate { value, .. } => UserError::AlreadyExists(value),
            other => other
                .downcast::<UserError>()
                .unwrap_or_else(|e| e.to_string().into()),
        }
    }
}

impl ApiError for UserError {
    fn kind(&self) -> ErrorKind {
        match self {
            UserError::NotFound(_) => ErrorKind::NotFound,
            UserError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            UserError::ValidationError(_)
            | UserError::ImmutableField(_)
            | UserError::AlreadyLiked { .. }
            | UserError::NotLiked { .. } => ErrorKind::Invalid,
            UserError::ActorCommunicationError(_) => ErrorKind::Internal,
        }
    }
}
