//! # Store Errors
//!
//! Errors produced by the collection actor and its client.

use std::error::Error;

/// Errors that can occur within the document store itself.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Collection actor closed")]
    ActorClosed,
    #[error("Collection actor dropped response channel")]
    ActorDropped,
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Duplicate value {value} for unique field {field}")]
    Duplicate { field: &'static str, value: String },
    #[error("Document error: {0}")]
    DocumentError(Box<dyn Error + Send + Sync>),
}

impl StoreError {
    pub fn document<E: Error + Send + Sync + 'static>(error: E) -> Self {
        StoreError::DocumentError(Box::new(error))
    }

    /// Recovers the document's own error type from a `DocumentError`.
    /// Any other variant, or a different inner type, is handed back unchanged.
    pub fn downcast<E: Error + 'static>(self) -> Result<E, StoreError> {
        match self {
            StoreError::DocumentError(inner) => inner
                .downcast::<E>()
                .map(|e| *e)
                .map_err(StoreError::DocumentError),
            other => Err(other),
        }
    }
}
