//! [`Document`] implementation for [`Order`].
//!
//! Placement happens in `on_create`: the order is stored only if the
//! [`StockLedger`] reserved stock for every line item.

use super::actions::OrderAction;
use super::error::OrderError;
use crate::clients::StockLedger;
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, OrderUpdate};
use async_trait::async_trait;
use chrono::Utc;
use docstore::{Document, FieldValue};
use tracing::info;

#[async_trait]
impl Document for Order {
    const COLLECTION: &'static str = "orders";
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = StockLedger;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if let Some(item) = params.items.iter().find(|item| item.amount == 0) {
            return Err(OrderError::ValidationError(format!(
                "amount for {} must be at least 1",
                item.product
            )));
        }

        let now = Utc::now();
        let (status, paid_at) = if params.is_paid {
            (OrderStatus::WaitDelivery, Some(params.paid_at.unwrap_or(now)))
        } else {
            (OrderStatus::WaitPayment, None)
        };

        Ok(Self {
            id,
            items: params.items,
            shipping_address: params.shipping_address,
            payment_method: params.payment_method,
            items_price: params.items_price,
            shipping_price: params.shipping_price,
            total_price: params.total_price,
            user: params.user,
            email: params.email,
            status,
            is_paid: params.is_paid,
            paid_at,
            cancelling: false,
            created_at: now,
            updated_at: now,
        })
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.into()),
            "user" => Some(self.user.into()),
            "email" => Some(self.email.as_str().into()),
            "status" => Some(self.status.into()),
            "product" => Some(
                self.items
                    .iter()
                    .map(|item| item.product)
                    .collect::<Vec<_>>()
                    .into(),
            ),
            "isPaid" => Some(self.is_paid.into()),
            "totalPrice" => Some(self.total_price.into()),
            "createdAt" => Some(self.created_at.into()),
            "updatedAt" => Some(self.updated_at.into()),
            _ => None,
        }
    }

    async fn on_create(&mut self, ledger: &StockLedger) -> Result<(), OrderError> {
        ledger
            .reserve_all(&self.items)
            .await
            .map_err(|failure| OrderError::OutOfStock(failure.failed))?;
        info!(order = %self.id, items = self.items.len(), "Stock reserved");
        Ok(())
    }

    async fn on_update(&mut self, update: OrderUpdate, _ctx: &StockLedger) -> Result<(), OrderError> {
        if self.cancelling {
            return Err(OrderError::CancellationInProgress(self.id));
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(is_paid) = update.is_paid {
            self.is_paid = is_paid;
            self.paid_at = if is_paid {
                self.paid_at.or(Some(Utc::now()))
            } else {
                None
            };
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &StockLedger,
    ) -> Result<Order, OrderError> {
        match action {
            OrderAction::ClaimCancellation => {
                if self.cancelling {
                    return Err(OrderError::CancellationInProgress(self.id));
                }
                self.cancelling = true;
            }
            OrderAction::ReleaseCancellation => self.cancelling = false,
        }
        Ok(self.clone())
    }
}
