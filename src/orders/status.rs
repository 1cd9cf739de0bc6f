//! Order status lifecycle.
//!
//! Statuses form a fixed directed edge set driven by the stall operator:
//!
//! ```text
//! pending ──► preparing ──► ready ──► completed
//!    │            │
//!    └────────────┴──► cancelled
//! ```
//!
//! `completed` and `cancelled` are terminal. Re-applying the current status is
//! not a legal transition.

use std::fmt;

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Placed, not yet accepted by the stall.
    Pending,
    /// Accepted; the stall is preparing the order.
    Preparing,
    /// Prepared and waiting for pickup.
    Ready,
    /// Picked up. Terminal.
    Completed,
    /// Cancelled by the operator before it was ready. Terminal.
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Preparing,
        Self::Ready,
        Self::Completed,
        Self::Cancelled,
    ];

    /// The statuses this status may transition to.
    #[must_use]
    pub fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Preparing, Self::Cancelled],
            Self::Preparing => &[Self::Ready, Self::Cancelled],
            Self::Ready => &[Self::Completed],
            Self::Completed | Self::Cancelled => &[],
        }
    }

    /// Whether `target` is reachable from this status in one transition.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self.allowed_targets().contains(&target)
    }

    /// Whether no further transitions are possible.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.allowed_targets().is_empty()
    }

    /// Lower-case label as shown to users.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Status filter for listing orders on dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every order.
    All,
    /// Every non-terminal order (pending, preparing, or ready).
    Open,
    /// Orders in exactly one status.
    Only(OrderStatus),
}

impl StatusFilter {
    /// Whether an order in `status` passes this filter.
    #[must_use]
    pub fn matches(self, status: OrderStatus) -> bool {
        match self {
            Self::All => true,
            Self::Open => !status.is_terminal(),
            Self::Only(wanted) => status == wanted,
        }
    }
}
