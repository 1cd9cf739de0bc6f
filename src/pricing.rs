//! Pricing
//!
//! Money arithmetic over priced lines. Everything here is checked: overflow
//! and currency mismatches surface as errors, never as panics.

use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors that can occur while calculating totals.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// No lines were provided, so currency could not be determined.
    #[error("no lines provided; cannot determine currency")]
    NoLines,

    /// Decimal arithmetic overflowed.
    #[error("total amount overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A line with a unit price and a quantity.
///
/// Implemented by cart lines and order-item snapshots so both share the same
/// total computation.
pub trait Priced<'a> {
    /// Unit price of the line.
    fn unit_price(&self) -> &Money<'a, Currency>;

    /// Quantity of the line (≥ 1 for any stored line).
    fn quantity(&self) -> u32;
}

/// Calculates the total of a single line: unit price × quantity.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: The multiplication overflowed.
pub fn line_total<'a, L: Priced<'a>>(line: &L) -> Result<Money<'a, Currency>, TotalPriceError> {
    let amount = line
        .unit_price()
        .amount()
        .checked_mul(Decimal::from(line.quantity()))
        .ok_or(TotalPriceError::Overflow)?;

    Ok(Money::from_decimal(amount, line.unit_price().currency()))
}

/// Calculates the total price of a list of lines.
///
/// # Errors
///
/// - [`TotalPriceError::NoLines`]: No lines were provided, so currency could not be determined.
/// - [`TotalPriceError::Overflow`]: A line total overflowed.
/// - [`TotalPriceError::Money`]: Wrapped money arithmetic or currency mismatch error.
pub fn total_price<'a, L: Priced<'a>>(lines: &[L]) -> Result<Money<'a, Currency>, TotalPriceError> {
    let first = lines.first().ok_or(TotalPriceError::NoLines)?;

    let total = lines.iter().try_fold(
        Money::from_minor(0, first.unit_price().currency()),
        |acc, line| {
            acc.add(line_total(line)?)
                .map_err(TotalPriceError::Money)
        },
    )?;

    Ok(total)
}
