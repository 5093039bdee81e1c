use crate::response::{ApiError, ErrorKind};
use docstore::StoreError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReviewError {
    #[error("Review not found: {0}")]
    NotFound(String),

    #[error("Review validation error: {0}")]
    ValidationError(String),

    #[error("Star rating must be between 1 and 5, got {0}")]
    InvalidStar(u8),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ReviewError {
    fn from(msg: String) -> Self {
        ReviewError::ActorCommunicationError(msg)
    }
}

impl From<StoreError> for ReviewError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ReviewError::NotFound(id),
            other => other
                .downcast::<ReviewError>()
                .unwrap_or_else(|e| e.to_string().into()),
        }
    }
}

impl ApiError for ReviewError {
    fn kind(&self) -> ErrorKind {
        match self {
            ReviewError::NotFound(_) => ErrorKind::NotFound,
            ReviewError::ValidationError(_) | ReviewError::InvalidStar(_) => ErrorKind::Invalid,
            ReviewError::ActorCommunicationError(_) => ErrorKind::Internal,
        }
    }
}
