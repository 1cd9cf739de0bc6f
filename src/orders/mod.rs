//! Orders
//!
//! The operator-owned order collection. Orders are created from checkout
//! snapshots, tracked through the status lifecycle in [`status`], and never
//! deleted — cancellation is itself a terminal status.

use chrono::NaiveTime;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    checkout::{OrderLine, OrderNumber, OrderRequest, PaymentMethod},
    pricing::{TotalPriceError, total_price},
};

pub mod status;

use status::{OrderStatus, StatusFilter};

new_key_type! {
    /// Order Key
    pub struct OrderKey;
}

/// Errors reported to the operator when acting on the order board.
#[derive(Debug, Error, PartialEq)]
pub enum OrderError {
    /// The order is not on the board.
    #[error("order {0:?} not found")]
    OrderNotFound(OrderKey),

    /// The requested status change is not a legal lifecycle transition.
    #[error("cannot move an order from {from} to {to}")]
    IllegalTransition {
        /// Status the order is currently in.
        from: OrderStatus,
        /// Status the operator asked for.
        to: OrderStatus,
    },
}

/// A placed order, tracked through the status lifecycle.
#[derive(Debug, Clone)]
pub struct Order<'a> {
    number: OrderNumber,
    customer: String,
    lines: SmallVec<[OrderLine<'a>; 8]>,
    payment: PaymentMethod,
    pickup_time: NaiveTime,
    placed_at: NaiveTime,
    status: OrderStatus,
    total: Money<'a, Currency>,
}

impl<'a> Order<'a> {
    /// Creates an order directly, e.g. from seed data. The total is computed
    /// from the lines, so the total-equals-sum-of-lines invariant holds by
    /// construction.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if the lines are empty or their total
    /// cannot be computed.
    pub fn new(
        number: OrderNumber,
        customer: impl Into<String>,
        lines: impl Into<SmallVec<[OrderLine<'a>; 8]>>,
        payment: PaymentMethod,
        pickup_time: NaiveTime,
        placed_at: NaiveTime,
        status: OrderStatus,
    ) -> Result<Self, TotalPriceError> {
        let lines = lines.into();
        let total = total_price(&lines)?;

        Ok(Self {
            number,
            customer: customer.into(),
            lines,
            payment,
            pickup_time,
            placed_at,
            status,
            total,
        })
    }

    /// Creates a `pending` order from a checkout snapshot.
    pub fn from_request(
        request: OrderRequest<'a>,
        customer: impl Into<String>,
        placed_at: NaiveTime,
    ) -> Self {
        let (number, lines, total, payment, pickup_time) = request.into_parts();

        Self {
            number,
            customer: customer.into(),
            lines,
            payment,
            pickup_time,
            placed_at,
            status: OrderStatus::Pending,
            total,
        }
    }

    /// The customer-facing order number.
    pub fn number(&self) -> &OrderNumber {
        &self.number
    }

    /// The customer who placed the order.
    pub fn customer(&self) -> &str {
        &self.customer
    }

    /// The ordered item snapshots.
    pub fn lines(&self) -> &[OrderLine<'a>] {
        &self.lines
    }

    /// Selected payment method.
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment
    }

    /// Requested pickup time.
    pub fn pickup_time(&self) -> NaiveTime {
        self.pickup_time
    }

    /// Time the order was placed.
    pub fn placed_at(&self) -> NaiveTime {
        self.placed_at
    }

    /// Current lifecycle status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Total amount at order time.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Whether the order is still in a non-terminal status.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
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
}

/// The operator-facing order collection: single writer, insertion-ordered.
#[derive(Debug, Default)]
pub struct OrderBoard<'a> {
    orders: SlotMap<OrderKey, Order<'a>>,
    order: Vec<OrderKey>,
    numbers: FxHashMap<OrderNumber, OrderKey>,
}

impl<'a> OrderBoard<'a> {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a new `pending` order from a checkout snapshot. Always succeeds.
    pub fn create_order(
        &mut self,
        request: OrderRequest<'a>,
        customer: impl Into<String>,
        placed_at: NaiveTime,
    ) -> OrderKey {
        self.seed(Order::from_request(request, customer, placed_at))
    }

    /// Inserts an existing order (e.g. seed data) with its declared status.
    pub fn seed(&mut self, order: Order<'a>) -> OrderKey {
        let number = order.number().clone();
        let key = self.orders.insert(order);

        self.order.push(key);
        self.numbers.insert(number, key);

        key
    }

    /// Moves an order to `target` along a legal lifecycle edge.
    ///
    /// Failures are user-visible rejections; the order is left untouched.
    ///
    /// # Errors
    ///
    /// - [`OrderError::OrderNotFound`]: The order is not on the board.
    /// - [`OrderError::IllegalTransition`]: `target` is not reachable from the
    ///   order's current status.
    pub fn transition(&mut self, key: OrderKey, target: OrderStatus) -> Result<(), OrderError> {
        let order = self
            .orders
            .get_mut(key)
            .ok_or(OrderError::OrderNotFound(key))?;

        if !order.status.can_transition_to(target) {
            return Err(OrderError::IllegalTransition {
                from: order.status,
                to: target,
            });
        }

        tracing::debug!(
            order = %order.number,
            from = %order.status,
            to = %target,
            "order status updated"
        );

        order.status = target;

        Ok(())
    }

    /// Lazily iterates over orders passing the filter, in insertion order.
    /// The iterator is restartable: call again for a fresh pass.
    pub fn list_by_status(&self, filter: StatusFilter) -> impl Iterator<Item = &Order<'a>> {
        self.iter().filter(move |order| filter.matches(order.status))
    }

    /// Counts the orders currently in each status. Every status appears as a
    /// key, zero counts included; the result always equals a fresh
    /// filter-and-count over the collection.
    #[must_use]
    pub fn counts_by_status(&self) -> FxHashMap<OrderStatus, usize> {
        let mut counts: FxHashMap<OrderStatus, usize> =
            OrderStatus::ALL.iter().map(|status| (*status, 0)).collect();

        for order in self.iter() {
            if let Some(count) = counts.get_mut(&order.status) {
                *count = count.saturating_add(1);
            }
        }

        counts
    }

    /// Looks up an order key by its order number.
    #[must_use]
    pub fn find_by_number(&self, number: &OrderNumber) -> Option<OrderKey> {
        self.numbers.get(number).copied()
    }

    /// Gets an order from the board.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderError::OrderNotFound`] if the order is not on the board.
    pub fn get(&self, key: OrderKey) -> Result<&Order<'a>, OrderError> {
        self.orders.get(key).ok_or(OrderError::OrderNotFound(key))
    }

    /// Iterates over every order, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Order<'a>> {
        self.order.iter().filter_map(|key| self.orders.get(*key))
    }

    /// Number of orders on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the board has no orders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::PHP;
    use testresult::TestResult;

    use super::*;

    fn time(s: &str) -> TestResult<NaiveTime> {
        Ok(NaiveTime::parse_from_str(s, "%H:%M")?)
    }

    fn test_request(number: &str) -> TestResult<OrderRequest<'static>> {
        Ok(OrderRequest::new(
            OrderNumber::new(number),
            vec![
                OrderLine::new("Chicken Adobo Rice", 2, Money::from_minor(6500, PHP)),
                OrderLine::new("Iced Coffee", 1, Money::from_minor(4500, PHP)),
            ],
            PaymentMethod::Cash,
            time("11:30")?,
        )?)
    }

    fn naive_counts(board: &OrderBoard<'_>) -> FxHashMap<OrderStatus, usize> {
        OrderStatus::ALL
            .iter()
            .map(|status| {
                (
                    *status,
                    board.list_by_status(StatusFilter::Only(*status)).count(),
                )
            })
            .collect()
    }

    #[test]
    fn create_order_starts_pending() -> TestResult {
        let mut board = OrderBoard::new();
        let key = board.create_order(test_request("ORD-000001")?, "Maria Santos", time("10:45")?);

        let order = board.get(key)?;

        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.customer(), "Maria Santos");
        assert_eq!(order.total(), Money::from_minor(17_500, PHP));
        assert_eq!(order.lines_total()?, order.total());

        Ok(())
    }

    #[test]
    fn legal_transitions_follow_the_table() -> TestResult {
        let mut board = OrderBoard::new();
        let key = board.create_order(test_request("ORD-000001")?, "Maria Santos", time("10:45")?);

        board.transition(key, OrderStatus::Preparing)?;
        board.transition(key, OrderStatus::Ready)?;
        board.transition(key, OrderStatus::Completed)?;

        assert_eq!(board.get(key)?.status(), OrderStatus::Completed);

        Ok(())
    }

    #[test]
    fn cancellation_is_allowed_from_pending_and_preparing_only() -> TestResult {
        let mut board = OrderBoard::new();

        let from_pending =
            board.create_order(test_request("ORD-000001")?, "Maria Santos", time("10:45")?);
        board.transition(from_pending, OrderStatus::Cancelled)?;

        let from_preparing =
            board.create_order(test_request("ORD-000002")?, "Juan Dela Cruz", time("10:50")?);
        board.transition(from_preparing, OrderStatus::Preparing)?;
        board.transition(from_preparing, OrderStatus::Cancelled)?;

        let from_ready =
            board.create_order(test_request("ORD-000003")?, "Anna Reyes", time("11:00")?);
        board.transition(from_ready, OrderStatus::Preparing)?;
        board.transition(from_ready, OrderStatus::Ready)?;

        assert!(matches!(
            board.transition(from_ready, OrderStatus::Cancelled),
            Err(OrderError::IllegalTransition {
                from: OrderStatus::Ready,
                to: OrderStatus::Cancelled,
            })
        ));

        Ok(())
    }

    #[test]
    fn illegal_transition_rejected_and_order_unchanged() -> TestResult {
        let mut board = OrderBoard::new();
        let key = board.create_order(test_request("ORD-000001")?, "Maria Santos", time("10:45")?);

        board.transition(key, OrderStatus::Preparing)?;
        board.transition(key, OrderStatus::Ready)?;

        assert!(matches!(
            board.transition(key, OrderStatus::Pending),
            Err(OrderError::IllegalTransition {
                from: OrderStatus::Ready,
                to: OrderStatus::Pending,
            })
        ));

        // Rejection must not mutate the order.
        assert_eq!(board.get(key)?.status(), OrderStatus::Ready);

        Ok(())
    }

    #[test]
    fn reapplying_the_current_status_is_illegal() -> TestResult {
        let mut board = OrderBoard::new();
        let key = board.create_order(test_request("ORD-000001")?, "Maria Santos", time("10:45")?);

        assert!(matches!(
            board.transition(key, OrderStatus::Pending),
            Err(OrderError::IllegalTransition { .. })
        ));

        Ok(())
    }

    #[test]
    fn terminal_statuses_reject_every_target() -> TestResult {
        let mut board = OrderBoard::new();
        let key = board.create_order(test_request("ORD-000001")?, "Maria Santos", time("10:45")?);

        board.transition(key, OrderStatus::Cancelled)?;

        for target in OrderStatus::ALL {
            assert!(matches!(
                board.transition(key, target),
                Err(OrderError::IllegalTransition { .. })
            ));
        }

        Ok(())
    }

    #[test]
    fn unknown_order_is_rejected() -> TestResult {
        let mut board = OrderBoard::new();

        assert!(matches!(
            board.transition(OrderKey::default(), OrderStatus::Preparing),
            Err(OrderError::OrderNotFound(_))
        ));
        assert!(matches!(
            board.get(OrderKey::default()),
            Err(OrderError::OrderNotFound(_))
        ));

        Ok(())
    }

    #[test]
    fn list_by_status_preserves_insertion_order_and_restarts() -> TestResult {
        let mut board = OrderBoard::new();

        board.create_order(test_request("ORD-000001")?, "Maria Santos", time("10:45")?);
        board.create_order(test_request("ORD-000002")?, "Juan Dela Cruz", time("10:50")?);
        board.create_order(test_request("ORD-000003")?, "Anna Reyes", time("11:00")?);

        let first_pass: Vec<&str> = board
            .list_by_status(StatusFilter::Only(OrderStatus::Pending))
            .map(|order| order.number().as_str())
            .collect();

        assert_eq!(first_pass, vec!["ORD-000001", "ORD-000002", "ORD-000003"]);

        // The sequence is restartable: a second pass yields the same orders.
        let second_pass: Vec<&str> = board
            .list_by_status(StatusFilter::Only(OrderStatus::Pending))
            .map(|order| order.number().as_str())
            .collect();

        assert_eq!(first_pass, second_pass);

        Ok(())
    }

    #[test]
    fn open_filter_excludes_terminal_orders() -> TestResult {
        let mut board = OrderBoard::new();

        let completed =
            board.create_order(test_request("ORD-000001")?, "Maria Santos", time("10:45")?);
        board.transition(completed, OrderStatus::Preparing)?;
        board.transition(completed, OrderStatus::Ready)?;
        board.transition(completed, OrderStatus::Completed)?;

        board.create_order(test_request("ORD-000002")?, "Juan Dela Cruz", time("10:50")?);

        let open: Vec<&str> = board
            .list_by_status(StatusFilter::Open)
            .map(|order| order.number().as_str())
            .collect();

        assert_eq!(open, vec!["ORD-000002"]);

        Ok(())
    }

    #[test]
    fn counts_by_status_equals_fresh_filter_and_count() -> TestResult {
        let mut board = OrderBoard::new();

        let a = board.create_order(test_request("ORD-000001")?, "Maria Santos", time("10:45")?);
        let b = board.create_order(test_request("ORD-000002")?, "Juan Dela Cruz", time("10:50")?);

        assert_eq!(board.counts_by_status(), naive_counts(&board));

        board.transition(a, OrderStatus::Preparing)?;
        board.transition(a, OrderStatus::Ready)?;
        board.transition(a, OrderStatus::Completed)?;
        board.transition(b, OrderStatus::Cancelled)?;

        let counts = board.counts_by_status();

        assert_eq!(counts, naive_counts(&board));
        assert_eq!(counts.get(&OrderStatus::Completed), Some(&1));
        assert_eq!(counts.get(&OrderStatus::Cancelled), Some(&1));
        assert_eq!(counts.get(&OrderStatus::Pending), Some(&0));
        assert_eq!(counts.get(&OrderStatus::Preparing), Some(&0));
        assert_eq!(counts.get(&OrderStatus::Ready), Some(&0));

        Ok(())
    }

    #[test]
    fn find_by_number_returns_key() -> TestResult {
        let mut board = OrderBoard::new();
        let key = board.create_order(test_request("ORD-000001")?, "Maria Santos", time("10:45")?);

        assert_eq!(
            board.find_by_number(&OrderNumber::new("ORD-000001")),
            Some(key)
        );
        assert_eq!(board.find_by_number(&OrderNumber::new("ORD-000099")), None);

        Ok(())
    }
}
