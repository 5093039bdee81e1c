//! Orders, their line items and the listing projection.
//!
//! An order is created only after stock for every line item has been reserved,
//! and is hard-deleted on cancellation once that stock has been released.

use super::{CityId, ListParams, OrderId, PaymentTypeId, ProductId, UserId};
use chrono::{DateTime, Utc};
use docstore::FieldValue;
use serde::{Deserialize, Serialize};

/// One product line of an order, embedded by value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product: ProductId,
    pub name: String,
    pub amount: u32,
    pub price: f64,
}

impl LineItem {
    pub fn new(product: ProductId, name: impl Into<String>, amount: u32, price: f64) -> Self {
        Self {
            product,
            name: name.into(),
            amount,
            price,
        }
    }

    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.amount)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub full_name: String,
    pub address: String,
    pub city: CityId,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    WaitPayment,
    WaitDelivery,
    Done,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::WaitPayment => "WAIT_PAYMENT",
            OrderStatus::WaitDelivery => "WAIT_DELIVERY",
            OrderStatus::Done => "DONE",
        }
    }
}

impl From<OrderStatus> for FieldValue {
    fn from(status: OrderStatus) -> Self {
        FieldValue::from(status.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<LineItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentTypeId,
    pub items_price: f64,
    pub shipping_price: f64,
    pub total_price: f64,
    pub user: UserId,
    pub email: String,
    pub status: OrderStatus,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    /// Set while a cancellation holds the order.
    #[serde(skip)]
    pub cancelling: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything needed to place an order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderCreate {
    pub items: Vec<LineItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentTypeId,
    pub items_price: f64,
    pub shipping_price: f64,
    pub total_price: f64,
    pub user: UserId,
    /// Recipient of the order confirmation.
    pub email: String,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub is_paid: Option<bool>,
}

/// Listing filters for orders. Each set is optional; an empty set does not filter.
/// Search matches the contact email.
#[derive(Debug, Clone, Default)]
pub struct OrderListParams {
    pub list: ListParams,
    pub users: Vec<UserId>,
    /// Orders containing any of these products.
    pub products: Vec<ProductId>,
    pub statuses: Vec<OrderStatus>,
}

/// The fields returned by order listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: OrderId,
    pub status: OrderStatus,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderSummary {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            status: order.status,
            email: order.email,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}
