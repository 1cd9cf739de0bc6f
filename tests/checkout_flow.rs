//! Integration test for the customer checkout flow against the shipped
//! `canteen` fixture set: browse the seeded menu, fill a cart, check out,
//! place the order on the seeded board, and report on the day.

use chrono::NaiveTime;
use rusty_money::Money;
use testresult::TestResult;

use kantina::{
    cart::{AddOutcome, Cart, CartError},
    checkout::{OrderNumberSequence, PaymentMethod},
    fixtures::Fixture,
    orders::status::{OrderStatus, StatusFilter},
    reports::SalesReport,
};

fn time(s: &str) -> TestResult<NaiveTime> {
    Ok(NaiveTime::parse_from_str(s, "%H:%M")?)
}

#[test]
fn cart_to_board_to_report() -> TestResult {
    let fixture = Fixture::from_set("canteen")?;
    let menu = fixture.menu()?;
    let currency = fixture.currency()?;

    let mut cart = Cart::new(currency);

    let adobo = fixture.menu_key("chicken-adobo-rice")?;
    let coffee = fixture.menu_key("iced-coffee")?;

    assert_eq!(cart.add(adobo, menu.get(adobo)?)?, AddOutcome::Added);
    assert_eq!(
        cart.add(adobo, menu.get(adobo)?)?,
        AddOutcome::QuantityIncreased
    );
    assert_eq!(cart.add(coffee, menu.get(coffee)?)?, AddOutcome::Added);

    // 2 × 65.00 + 45.00
    let expected_total = Money::from_minor(17_500, currency);

    assert_eq!(cart.total()?, expected_total);

    let mut numbers = OrderNumberSequence::starting_at(5);
    let request = cart.checkout(
        Some(PaymentMethod::GCash),
        Some(time("11:30")?),
        &mut numbers,
    )?;

    assert_eq!(request.total(), expected_total);
    assert!(cart.is_empty());

    let mut board = fixture.order_board();
    let seeded = board.len();

    let key = board.create_order(request, "Maria Santos", time("10:55")?);

    assert_eq!(board.len(), seeded + 1);
    assert_eq!(board.get(key)?.status(), OrderStatus::Pending);
    assert_eq!(board.get(key)?.total(), expected_total);

    // Drive the new order to completion; the day now has two completed orders
    // (ORD-004 is seeded completed).
    board.transition(key, OrderStatus::Preparing)?;
    board.transition(key, OrderStatus::Ready)?;
    board.transition(key, OrderStatus::Completed)?;

    let report = SalesReport::from_orders(board.iter(), currency)?;

    // 100.00 seeded + 175.00 placed here.
    assert_eq!(report.order_count(), 2);
    assert_eq!(report.total_sales(), Money::from_minor(27_500, currency));

    let pending_numbers: Vec<&str> = board
        .list_by_status(StatusFilter::Only(OrderStatus::Pending))
        .map(|order| order.number().as_str())
        .collect();

    assert_eq!(pending_numbers, vec!["ORD-001"]);

    Ok(())
}

#[test]
fn unavailable_seeded_item_is_rejected_at_add() -> TestResult {
    let fixture = Fixture::from_set("canteen")?;
    let menu = fixture.menu()?;

    // Burger Steak ships unavailable in the canteen set.
    let burger = fixture.menu_key("burger-steak")?;

    let mut cart = Cart::new(fixture.currency()?);
    let result = cart.add(burger, menu.get(burger)?);

    assert!(matches!(result, Err(CartError::ItemUnavailable(name)) if name == "Burger Steak"));
    assert!(cart.is_empty());

    Ok(())
}

#[test]
fn checkout_validation_reports_each_missing_input() -> TestResult {
    let fixture = Fixture::from_set("canteen")?;
    let menu = fixture.menu()?;
    let mut numbers = OrderNumberSequence::new();

    let mut cart = Cart::new(fixture.currency()?);

    assert!(matches!(
        cart.checkout(Some(PaymentMethod::Cash), Some(time("11:30")?), &mut numbers),
        Err(CartError::EmptyCart)
    ));

    let adobo = fixture.menu_key("chicken-adobo-rice")?;
    cart.add(adobo, menu.get(adobo)?)?;

    assert!(matches!(
        cart.checkout(None, Some(time("11:30")?), &mut numbers),
        Err(CartError::MissingPaymentMethod)
    ));
    assert!(matches!(
        cart.checkout(Some(PaymentMethod::Cash), None, &mut numbers),
        Err(CartError::MissingPickupTime)
    ));

    // The cart is untouched by the failed attempts and still checks out.
    let request = cart.checkout(
        Some(PaymentMethod::Cash),
        Some(time("11:30")?),
        &mut numbers,
    )?;

    assert_eq!(request.lines().len(), 1);

    Ok(())
}
