//! Checkout
//!
//! The order-request snapshot produced when a cart is checked out, plus order
//! numbering. An [`OrderRequest`] is created once and never mutated; the
//! operator-facing order board consumes it when the order is placed.

use std::{fmt, io};

use chrono::NaiveTime;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{Alignment, Color, Style, Theme, object::{Columns, Rows}},
};
use thiserror::Error;

use crate::pricing::{Priced, TotalPriceError, line_total, total_price};

/// Errors that can occur when rendering an order confirmation.
#[derive(Debug, Error)]
pub enum ConfirmationError {
    /// Error computing a line total for display.
    #[error(transparent)]
    Total(#[from] TotalPriceError),

    /// IO error writing the confirmation.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Cash on pickup.
    Cash,
    /// GCash mobile wallet.
    GCash,
    /// Debit or credit card.
    Card,
}

impl PaymentMethod {
    /// Customer-facing label for the payment method.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Cash => "Cash on Pickup",
            Self::GCash => "GCash",
            Self::Card => "Debit/Credit Card",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A customer-facing order number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Creates an order number from an existing token (e.g. seed data).
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generator of unique, monotonically increasing order numbers.
///
/// Injected into [`Cart::checkout`](crate::cart::Cart::checkout) so order
/// numbering is owned by the caller rather than by ambient process state.
#[derive(Debug)]
pub struct OrderNumberSequence {
    next: u64,
}

impl OrderNumberSequence {
    /// Creates a sequence starting at `ORD-000001`.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Creates a sequence starting at the given counter value.
    #[must_use]
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// Produces the next order number in the sequence.
    pub fn next_number(&mut self) -> OrderNumber {
        let number = OrderNumber(format!("ORD-{:06}", self.next));
        self.next = self.next.saturating_add(1);
        number
    }
}

impl Default for OrderNumberSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// An item snapshot on an order: name, quantity, and unit price at the time
/// the order was placed. Later menu price changes do not affect it.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine<'a> {
    name: String,
    quantity: u32,
    unit_price: Money<'a, Currency>,
}

impl<'a> OrderLine<'a> {
    /// Creates a new order line snapshot.
    pub fn new(name: impl Into<String>, quantity: u32, unit_price: Money<'a, Currency>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// Item name at order time.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<'a> Priced<'a> for OrderLine<'a> {
    fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Immutable snapshot of a finalized cart, produced at checkout.
#[derive(Debug, Clone)]
pub struct OrderRequest<'a> {
    number: OrderNumber,
    lines: SmallVec<[OrderLine<'a>; 8]>,
    total: Money<'a, Currency>,
    payment: PaymentMethod,
    pickup_time: NaiveTime,
}

impl<'a> OrderRequest<'a> {
    /// Creates a new order request. The total is computed from the lines, so
    /// the total-equals-sum-of-lines invariant holds by construction.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the lines are empty or their total
    /// cannot be computed.
    pub fn new(
        number: OrderNumber,
        lines: impl Into<SmallVec<[OrderLine<'a>; 8]>>,
        payment: PaymentMethod,
        pickup_time: NaiveTime,
    ) -> Result<Self, TotalPriceError> {
        let lines = lines.into();
        let total = total_price(&lines)?;

        Ok(Self {
            number,
            lines,
            total,
            payment,
            pickup_time,
        })
    }

    /// The generated order number.
    pub fn number(&self) -> &OrderNumber {
        &self.number
    }

    /// The ordered item snapshots.
    pub fn lines(&self) -> &[OrderLine<'a>] {
        &self.lines
    }

    /// Total amount at checkout time.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Selected payment method.
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment
    }

    /// Requested pickup time.
    pub fn pickup_time(&self) -> NaiveTime {
        self.pickup_time
    }

    /// Recomputes the total from the item snapshots. Always equals
    /// [`total`](Self::total).
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the total cannot be computed.
    pub fn lines_total(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        total_price(&self.lines)
    }

    /// Takes the parts needed to build an order from the request.
    pub(crate) fn into_parts(
        self,
    ) -> (
        OrderNumber,
        SmallVec<[OrderLine<'a>; 8]>,
        Money<'a, Currency>,
        PaymentMethod,
        NaiveTime,
    ) {
        (
            self.number,
            self.lines,
            self.total,
            self.payment,
            self.pickup_time,
        )
    }

    /// Writes the order confirmation as a plain-text table.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfirmationError`] if a line total cannot be computed or
    /// the output cannot be written.
    pub fn write_confirmation(&self, out: &mut impl io::Write) -> Result<(), ConfirmationError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Unit Price", "Line Total"]);

        for line in &self.lines {
            builder.push_record([
                line.name().to_string(),
                line.quantity().to_string(),
                line.unit_price().to_string(),
                line_total(line)?.to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Theme::from(Style::modern_rounded()));
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..4), Alignment::right());

        writeln!(out, "Order {}", self.number)?;
        writeln!(out, "{table}")?;
        writeln!(out, "Pickup:  {}", self.pickup_time.format("%H:%M"))?;
        writeln!(out, "Payment: {}", self.payment)?;
        writeln!(out, "Total:   {}", self.total)?;

        Ok(())
    }
}
