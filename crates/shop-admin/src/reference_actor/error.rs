use crate::response::{ApiError, ErrorKind};
use docstore::StoreError;
use thiserror::Error;

/// Errors shared by the city, product type and payment type collections.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReferenceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("The name {0} is already in use")]
    AlreadyExists(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ReferenceError {
    fn from(msg: String) -> Self {
        ReferenceError::ActorCommunicationError(msg)
    }
}

/// Lifts a store failure into the collection's error: missing documents and unique
/// index conflicts get their own variants, document errors are unwrapped.
impl From<StoreError> for ReferenceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ReferenceError::NotFound(id),
            StoreError::Duplicate { value, .. } => ReferenceError::AlreadyExists(value),
            other => other
                .downcast::<ReferenceError>()
                .unwrap_or_else(|e| e.to_string().into()),
        }
    }
}

impl ApiError for ReferenceError {
    fn kind(&self) -> ErrorKind {
        match self {
            ReferenceError::NotFound(_) => ErrorKind::NotFound,
            ReferenceError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            ReferenceError::ValidationError(_) => ErrorKind::Invalid,
            ReferenceError::ActorCommunicationError(_) => ErrorKind::Internal,
        }
    }
}
