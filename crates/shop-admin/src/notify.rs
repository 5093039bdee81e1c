//! Order confirmation seam.
//!
//! Delivery is outside this crate: [`OrderNotifier`] is the hook an email service
//! plugs into. [`LogNotifier`] only records the notification.

use crate::model::LineItem;
use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum NotifyError {
    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}

/// Receives a callback for every placed order.
#[async_trait]
pub trait OrderNotifier: Send + Sync {
    async fn order_created(&self, recipient: &str, items: &[LineItem]) -> Result<(), NotifyError>;
}

/// Logs each confirmation instead of sending it.
#[derive(Debug, Clone)]
pub struct LogNotifier {
    sender: String,
}

impl LogNotifier {
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
        }
    }
}

#[async_trait]
impl OrderNotifier for LogNotifier {
    async fn order_created(&self, recipient: &str, items: &[LineItem]) -> Result<(), NotifyError> {
        let total: f64 = items.iter().map(LineItem::subtotal).sum();
        info!(from = %self.sender, to = recipient, items = items.len(), total, "Order confirmation");
        Ok(())
    }
}
