//! Order Fixtures

use serde::Deserialize;

use crate::{checkout::PaymentMethod, orders::status::OrderStatus};

/// Wrapper for seed orders in YAML. Orders are a list so seed data keeps its
/// placement order.
#[derive(Debug, Deserialize)]
pub struct OrdersFixture {
    /// Seed orders, in placement order.
    pub orders: Vec<OrderFixture>,
}

/// Seed order from YAML.
#[derive(Debug, Deserialize)]
pub struct OrderFixture {
    /// Customer-facing order number, e.g. "ORD-001".
    pub number: String,

    /// Customer name.
    pub customer: String,

    /// Time the order was placed, as "HH:MM".
    pub placed_at: String,

    /// Requested pickup time, as "HH:MM".
    pub pickup_time: String,

    /// Lifecycle status the order is seeded in.
    pub status: StatusFixture,

    /// Payment method.
    pub payment: PaymentFixture,

    /// Declared total, verified against the computed total on load.
    pub total: String,

    /// Ordered lines, referencing menu items by string key.
    pub lines: Vec<OrderLineFixture>,
}

/// A line of a seed order.
#[derive(Debug, Deserialize)]
pub struct OrderLineFixture {
    /// String key of the menu item.
    pub item: String,

    /// Quantity ordered.
    pub quantity: u32,
}

/// Order status from YAML.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusFixture {
    /// Placed, not yet accepted.
    Pending,
    /// Being prepared.
    Preparing,
    /// Waiting for pickup.
    Ready,
    /// Picked up.
    Completed,
    /// Cancelled by the operator.
    Cancelled,
}

impl From<StatusFixture> for OrderStatus {
    fn from(status: StatusFixture) -> Self {
        match status {
            StatusFixture::Pending => Self::Pending,
            StatusFixture::Preparing => Self::Preparing,
            StatusFixture::Ready => Self::Ready,
            StatusFixture::Completed => Self::Completed,
            StatusFixture::Cancelled => Self::Cancelled,
        }
    }
}

/// Payment method from YAML.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFixture {
    /// Cash on pickup.
    Cash,
    /// GCash mobile wallet.
    Gcash,
    /// Debit or credit card.
    Card,
}

impl From<PaymentFixture> for PaymentMethod {
    fn from(payment: PaymentFixture) -> Self {
        match payment {
            PaymentFixture::Cash => Self::Cash,
            PaymentFixture::Gcash => Self::GCash,
            PaymentFixture::Card => Self::Card,
        }
    }
}
