//! Order Day
//!
//! This demo walks the whole pre-ordering flow end to end: a customer browses
//! the seeded menu, fills a cart and checks out; the stall operator drives the
//! order through its lifecycle; the admin report aggregates the day.
//!
//! Use `-f` to load a fixture set by name
//! Use `-c` to set the customer name on the demo order

use std::io::{Write, stdout};

use anyhow::Result;
use chrono::NaiveTime;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kantina::{
    cart::Cart,
    checkout::{OrderNumberSequence, PaymentMethod},
    fixtures::Fixture,
    orders::status::{OrderStatus, StatusFilter},
    reports::SalesReport,
    session::Session,
    utils::DemoArgs,
};

/// Order Day Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = DemoArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let menu = fixture.menu()?;
    let currency = fixture.currency()?;

    // A student signs in and lands on the menu.
    let mut session = Session::new();
    let role = session.login("maria.santos@adnu.edu.ph");

    println!("Signed in as {role:?}, viewing {:?}", session.view());
    println!();

    // Browse the menu and fill a cart.
    let mut cart = Cart::new(currency);

    for key in ["chicken-adobo-rice", "iced-coffee"] {
        let item_key = fixture.menu_key(key)?;
        let outcome = cart.add(item_key, menu.get(item_key)?)?;

        println!("{key}: {outcome:?}");
    }

    // One more adobo rice.
    let adobo = fixture.menu_key("chicken-adobo-rice")?;
    cart.add(adobo, menu.get(adobo)?)?;

    println!("Cart: {} items, total {}", cart.item_count(), cart.total()?);
    println!();

    // Check out. Seed orders run up to ORD-004, so number from 5.
    let mut numbers = OrderNumberSequence::starting_at(5);
    let pickup = NaiveTime::parse_from_str("11:30", "%H:%M")?;

    let request = cart.checkout(Some(PaymentMethod::GCash), Some(pickup), &mut numbers)?;

    request.write_confirmation(&mut stdout())?;
    println!();

    // The order lands on the operator's board next to the seeded ones.
    let mut board = fixture.order_board();
    let placed_at = NaiveTime::parse_from_str("10:55", "%H:%M")?;
    let key = board.create_order(request, args.customer.as_str(), placed_at);

    for target in [OrderStatus::Preparing, OrderStatus::Ready, OrderStatus::Completed] {
        board.transition(key, target)?;
        println!("{} -> {target}", board.get(key)?.number());
    }

    println!();
    println!("Board tiles:");

    let counts = board.counts_by_status();

    for status in OrderStatus::ALL {
        println!("  {status:<10} {}", counts.get(&status).copied().unwrap_or(0));
    }

    println!();
    println!(
        "Open orders: {}",
        board.list_by_status(StatusFilter::Open).count()
    );
    println!();

    // The admin closes the day with the sales report.
    let report = SalesReport::from_orders(board.iter(), currency)?;

    report.write_table(&mut stdout())?;
    stdout().flush()?;

    Ok(())
}
