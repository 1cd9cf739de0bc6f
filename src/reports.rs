//! Reports
//!
//! Sales reporting for the admin dashboard, aggregated from the order
//! collection. Only completed orders count towards sales figures.

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{Money, MoneyError, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Color, Style, Theme, object::{Columns, Rows}},
};
use thiserror::Error;

use crate::{
    orders::{Order, status::OrderStatus},
    pricing::{Priced, TotalPriceError, line_total},
};

/// Errors that can occur while building or rendering a sales report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// An order's currency differs from the report currency (order currency, report currency).
    #[error("order has currency {0}, but report has currency {1}")]
    MixedCurrency(&'static str, &'static str),

    /// Decimal arithmetic overflowed.
    #[error("report arithmetic overflowed")]
    Overflow,

    /// Wrapped money arithmetic error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Error computing a line total.
    #[error(transparent)]
    Total(#[from] TotalPriceError),

    /// IO error writing the report.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Sales figures for one menu item across all completed orders.
#[derive(Debug, Clone)]
pub struct ItemSales<'a> {
    name: String,
    units: u32,
    revenue: Money<'a, Currency>,
    share: Percentage,
}

impl<'a> ItemSales<'a> {
    /// Item name as snapshotted on the orders.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units sold.
    pub fn units(&self) -> u32 {
        self.units
    }

    /// Revenue attributed to this item.
    pub fn revenue(&self) -> Money<'a, Currency> {
        self.revenue
    }

    /// This item's fraction of total sales.
    pub fn share(&self) -> Percentage {
        self.share
    }
}

/// A point-in-time sales report over an order collection.
#[derive(Debug)]
pub struct SalesReport<'a> {
    currency: &'static Currency,
    total_sales: Money<'a, Currency>,
    order_count: usize,
    average_order_value: Option<Money<'a, Currency>>,
    items: Vec<ItemSales<'a>>,
}

impl<'a> SalesReport<'a> {
    /// Builds a report from an order collection, counting completed orders
    /// only. The report always equals a fresh aggregation over the input.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] on mixed currencies or failed arithmetic.
    pub fn from_orders<'o>(
        orders: impl IntoIterator<Item = &'o Order<'a>>,
        currency: &'static Currency,
    ) -> Result<Self, ReportError>
    where
        'a: 'o,
    {
        let mut total_sales = Money::from_minor(0, currency);
        let mut order_count: usize = 0;
        let mut by_item: FxHashMap<String, (u32, Money<'a, Currency>)> = FxHashMap::default();

        for order in orders {
            if order.status() != OrderStatus::Completed {
                continue;
            }

            let order_currency = order.total().currency();

            if order_currency != currency {
                return Err(ReportError::MixedCurrency(
                    order_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            total_sales = total_sales.add(order.total())?;
            order_count = order_count.saturating_add(1);

            for line in order.lines() {
                let revenue = line_total(line)?;

                match by_item.get_mut(line.name()) {
                    Some((units, item_revenue)) => {
                        *units = units.saturating_add(line.quantity());
                        *item_revenue = item_revenue.add(revenue)?;
                    }
                    None => {
                        by_item.insert(line.name().to_string(), (line.quantity(), revenue));
                    }
                }
            }
        }

        let average_order_value = if order_count == 0 {
            None
        } else {
            let divisor = Decimal::from(u64::try_from(order_count).unwrap_or(u64::MAX));
            let amount = total_sales
                .amount()
                .checked_div(divisor)
                .ok_or(ReportError::Overflow)?;

            Some(Money::from_decimal(amount.round_dp(2), currency))
        };

        let mut items = Vec::with_capacity(by_item.len());

        for (name, (units, revenue)) in by_item {
            let ratio = if total_sales.amount().is_zero() {
                Decimal::ZERO
            } else {
                revenue
                    .amount()
                    .checked_div(*total_sales.amount())
                    .ok_or(ReportError::Overflow)?
            };

            items.push(ItemSales {
                name,
                units,
                revenue,
                share: Percentage::from(ratio),
            });
        }

        // Best sellers first; name break ties so the ordering is stable.
        items.sort_by(|a, b| b.units.cmp(&a.units).then_with(|| a.name.cmp(&b.name)));

        Ok(Self {
            currency,
            total_sales,
            order_count,
            average_order_value,
            items,
        })
    }

    /// Total sales across completed orders.
    pub fn total_sales(&self) -> Money<'a, Currency> {
        self.total_sales
    }

    /// Number of completed orders.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.order_count
    }

    /// Average completed-order value; `None` when no orders completed.
    pub fn average_order_value(&self) -> Option<Money<'a, Currency>> {
        self.average_order_value
    }

    /// Per-item sales, best sellers first.
    pub fn item_sales(&self) -> &[ItemSales<'a>] {
        &self.items
    }

    /// The `n` best-selling items.
    pub fn top_sellers(&self, n: usize) -> impl Iterator<Item = &ItemSales<'a>> {
        self.items.iter().take(n)
    }

    /// The `n` least-selling items, worst first.
    pub fn least_sellers(&self, n: usize) -> impl Iterator<Item = &ItemSales<'a>> {
        self.items.iter().rev().take(n)
    }

    /// The report currency.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Writes the report as a plain-text table.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError::Io`] if the output cannot be written.
    pub fn write_table(&self, out: &mut impl io::Write) -> Result<(), ReportError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Units", "Revenue", "Share"]);

        for item in &self.items {
            builder.push_record([
                item.name().to_string(),
                item.units().to_string(),
                item.revenue().to_string(),
                format!("{}%", share_points(item.share())),
            ]);
        }

        let mut table = builder.build();

        table.with(Theme::from(Style::modern_rounded()));
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(1..4), Alignment::right());

        writeln!(out, "{table}")?;
        writeln!(out, "Total sales:         {}", self.total_sales)?;
        writeln!(out, "Orders completed:    {}", self.order_count)?;

        if let Some(average) = self.average_order_value {
            writeln!(out, "Average order value: {average}")?;
        }

        Ok(())
    }
}

/// Converts a fractional share to percent points for display.
fn share_points(share: Percentage) -> Decimal {
    ((share * Decimal::ONE) * Decimal::ONE_HUNDRED).round_dp(1)
}
