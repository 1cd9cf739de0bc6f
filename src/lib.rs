//! Kantina
//!
//! Kantina is the domain core of a campus food pre-ordering system: a menu
//! catalog, customer carts with checkout, and an operator-facing order board
//! with a fixed status lifecycle. All state is process-local; seed data is
//! loaded from YAML fixture files.

pub mod cart;
pub mod checkout;
pub mod fixtures;
pub mod menu;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod reports;
pub mod session;
pub mod stalls;
pub mod utils;
