//! Cart
//!
//! The customer-owned pre-checkout cart: an insertion-ordered set of menu-item
//! snapshots with quantities. A line with quantity 0 never exists in the cart.

use chrono::NaiveTime;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    checkout::{OrderLine, OrderNumberSequence, OrderRequest, PaymentMethod},
    menu::{MenuItem, MenuItemKey},
    pricing::{Priced, TotalPriceError, total_price},
};

/// Errors related to cart mutation or checkout.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// Checkout was attempted on an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// Checkout was attempted without a payment method.
    #[error("no payment method selected")]
    MissingPaymentMethod,

    /// Checkout was attempted without a pickup time.
    #[error("no pickup time selected")]
    MissingPickupTime,

    /// The item is not currently available to order.
    #[error("item {0} is not available")]
    ItemUnavailable(String),

    /// An item's currency differs from the cart currency (item currency, cart currency).
    #[error("item has currency {0}, but cart has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// Error computing the cart total.
    #[error(transparent)]
    Total(#[from] TotalPriceError),
}

/// Outcome of adding an item to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The item was not in the cart; a new line with quantity 1 was inserted.
    Added,
    /// The item was already in the cart; its quantity was incremented.
    QuantityIncreased,
}

/// A menu-item snapshot plus a quantity (always ≥ 1 while stored).
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine<'a> {
    item_key: MenuItemKey,
    item: MenuItem<'a>,
    quantity: u32,
}

impl<'a> CartLine<'a> {
    fn new(item_key: MenuItemKey, item: MenuItem<'a>) -> Self {
        Self {
            item_key,
            item,
            quantity: 1,
        }
    }

    /// Key of the menu item this line snapshots.
    pub fn item_key(&self) -> MenuItemKey {
        self.item_key
    }

    /// The menu-item snapshot taken when the line was added.
    pub fn item(&self) -> &MenuItem<'a> {
        &self.item
    }
}

impl<'a> Priced<'a> for CartLine<'a> {
    fn unit_price(&self) -> &Money<'a, Currency> {
        self.item.price()
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// A customer cart. Created empty at session start; cleared by a successful
/// checkout. At most one line exists per menu item.
#[derive(Debug)]
pub struct Cart<'a> {
    lines: Vec<CartLine<'a>>,
    currency: &'static Currency,
}

impl<'a> Cart<'a> {
    /// Creates an empty cart priced in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    /// Adds one unit of a menu item to the cart.
    ///
    /// If the item is already in the cart its quantity is incremented;
    /// otherwise a new line with quantity 1 is inserted (the outcome reports
    /// which happened, so the caller can phrase its notification).
    ///
    /// # Errors
    ///
    /// - [`CartError::ItemUnavailable`]: The item is not currently available.
    /// - [`CartError::CurrencyMismatch`]: The item's currency differs from the cart's.
    pub fn add(&mut self, key: MenuItemKey, item: &MenuItem<'a>) -> Result<AddOutcome, CartError> {
        if !item.is_available() {
            return Err(CartError::ItemUnavailable(item.name().to_string()));
        }

        let item_currency = item.price().currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.item_key == key) {
            line.quantity = line.quantity.saturating_add(1);
            return Ok(AddOutcome::QuantityIncreased);
        }

        self.lines.push(CartLine::new(key, item.clone()));

        Ok(AddOutcome::Added)
    }

    /// Adjusts the quantity of a line by `delta`, flooring at 0.
    ///
    /// A resulting quantity of 0 removes the line entirely. An unknown key is
    /// a no-op.
    pub fn update_quantity(&mut self, key: MenuItemKey, delta: i32) {
        let Some(index) = self.lines.iter().position(|line| line.item_key == key) else {
            return;
        };

        let Some(line) = self.lines.get_mut(index) else {
            return;
        };

        let current = i64::from(line.quantity);
        let updated = current.saturating_add(i64::from(delta)).max(0);

        if updated == 0 {
            self.lines.remove(index);
        } else {
            line.quantity = u32::try_from(updated).unwrap_or(u32::MAX);
        }
    }

    /// Calculates the cart total: sum of unit price × quantity over all lines.
    /// An empty cart totals zero in the cart currency.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the total cannot be computed.
    pub fn total(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        if self.is_empty() {
            return Ok(Money::from_minor(0, self.currency));
        }

        total_price(&self.lines)
    }

    /// Finalizes the cart into an immutable [`OrderRequest`] and clears it.
    ///
    /// Validation is all-or-nothing: any failure leaves the cart untouched.
    ///
    /// # Errors
    ///
    /// - [`CartError::EmptyCart`]: The cart has no lines.
    /// - [`CartError::MissingPaymentMethod`]: No payment method was selected.
    /// - [`CartError::MissingPickupTime`]: No pickup time was selected.
    /// - [`CartError::Total`]: The total could not be computed.
    pub fn checkout(
        &mut self,
        payment: Option<PaymentMethod>,
        pickup_time: Option<NaiveTime>,
        numbers: &mut OrderNumberSequence,
    ) -> Result<OrderRequest<'a>, CartError> {
        if self.is_empty() {
            return Err(CartError::EmptyCart);
        }

        let payment = payment.ok_or(CartError::MissingPaymentMethod)?;
        let pickup_time = pickup_time.ok_or(CartError::MissingPickupTime)?;

        let lines: SmallVec<[OrderLine<'a>; 8]> = self
            .lines
            .iter()
            .map(|line| {
                OrderLine::new(line.item.name(), line.quantity, *line.item.price())
            })
            .collect();

        let number = numbers.next_number();
        let request = OrderRequest::new(number, lines, payment, pickup_time)?;

        tracing::debug!(
            order = %request.number(),
            total = %request.total(),
            "cart checked out"
        );

        self.lines.clear();

        Ok(request)
    }

    /// The current cart lines, in insertion order.
    pub fn lines(&self) -> &[CartLine<'a>] {
        &self.lines
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The currency of the cart.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
