//! Error types for the Order actor.

use crate::model::{OrderId, ProductId};
use crate::response::{ApiError, ErrorKind};
use docstore::StoreError;
use thiserror::Error;

fn join_ids(ids: &[ProductId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// Stock could not be reserved for these products, in line-item order.
    #[error("The product with id: {} out of the stock", join_ids(.0))]
    OutOfStock(Vec<ProductId>),

    /// Stock could not be returned for these products during cancellation.
    /// Releases that did succeed were re-reserved and the order was kept.
    #[error("Failed to restore stock for products: {}", join_ids(.0))]
    ReversalFailed(Vec<ProductId>),

    /// A cancellation failed and some of its releases could not be undone. The
    /// order stays claimed so its stock is never released a second time.
    #[error(
        "Order {order} cancellation stopped with stock already restored for products: {}",
        join_ids(.restored)
    )]
    CancellationStalled {
        order: OrderId,
        failed: Vec<ProductId>,
        restored: Vec<ProductId>,
    },

    #[error("Order {0} is already being cancelled")]
    CancellationInProgress(OrderId),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}

impl From<StoreError> for OrderError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => OrderError::NotFound(id),
            other => other
                .downcast::<OrderError>()
                .unwrap_or_else(|e| e.to_string().into()),
        }
    }
}

impl ApiError for OrderError {
    fn kind(&self) -> ErrorKind {
        match self {
            OrderError::NotFound(_) => ErrorKind::NotFound,
            OrderError::ValidationError(_) | OrderError::CancellationInProgress(_) => {
                ErrorKind::Invalid
            }
            OrderError::OutOfStock(_) => ErrorKind::OutOfStock,
            OrderError::ReversalFailed(_)
            | OrderError::CancellationStalled { .. }
            | OrderError::ActorCommunicationError(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_stock_message_lists_ids_in_order() {
        let err = OrderError::OutOfStock(vec![ProductId(2), ProductId(1)]);
        assert_eq!(
            err.to_string(),
            "The product with id: product_2,product_1 out of the stock"
        );
        assert_eq!(err.kind(), ErrorKind::OutOfStock);
    }

    #[test]
    fn test_document_error_is_recovered_from_store_error() {
        let store_err = StoreError::document(OrderError::OutOfStock(vec![ProductId(4)]));
        assert_eq!(
            OrderError::from(store_err),
            OrderError::OutOfStock(vec![ProductId(4)])
        );
        assert!(matches!(
            OrderError::from(StoreError::ActorClosed),
            OrderError::ActorCommunicationError(_)
        ));
    }

    #[test]
    fn test_stalled_cancellation_names_restored_products() {
        let err = OrderError::CancellationStalled {
            order: OrderId(7),
            failed: vec![ProductId(2)],
            restored: vec![ProductId(1), ProductId(3)],
        };
        assert_eq!(
            err.to_string(),
            "Order order_7 cancellation stopped with stock already restored for products: product_1,product_3"
        );
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
