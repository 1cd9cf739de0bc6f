//! Kantina prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{AddOutcome, Cart, CartError, CartLine},
    checkout::{
        ConfirmationError, OrderLine, OrderNumber, OrderNumberSequence, OrderRequest,
        PaymentMethod,
    },
    fixtures::{Fixture, FixtureError},
    menu::{Menu, MenuError, MenuItem, MenuItemKey},
    orders::{
        Order, OrderBoard, OrderError, OrderKey,
        status::{OrderStatus, StatusFilter},
    },
    pricing::{Priced, TotalPriceError, line_total, total_price},
    reports::{ItemSales, ReportError, SalesReport},
    session::{Role, Session, SessionError, View, role_for_email},
    stalls::{Stall, StallDirectory, StallError, StallKey, StallStatus},
};
