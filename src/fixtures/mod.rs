//! Fixtures
//!
//! YAML seed data for the menu, stall directory, and order board. Seed data
//! is constructor-injected into the core collections rather than hardcoded,
//! so tests and demos can swap sets by name.

use std::{fs, path::PathBuf};

use chrono::NaiveTime;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso, iso::Currency};
use thiserror::Error;

use crate::{
    checkout::{OrderLine, OrderNumber},
    menu::{Menu, MenuError, MenuItem, MenuItemKey},
    orders::{Order, OrderBoard},
    pricing::TotalPriceError,
    stalls::{Stall, StallDirectory, StallError, StallKey},
};

pub mod menu;
pub mod orders;
pub mod stalls;

use crate::fixtures::{menu::MenuFixture, orders::OrdersFixture, stalls::StallsFixture};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files.
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format.
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Invalid "HH:MM" time.
    #[error("Invalid time: {0}")]
    InvalidTime(String),

    /// Currency mismatch between fixture entries.
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// A menu item referenced a stall key that was not loaded.
    #[error("Stall not found: {0}")]
    UnknownStall(String),

    /// An order line referenced a menu item key that was not loaded.
    #[error("Menu item not found: {0}")]
    UnknownMenuItem(String),

    /// Two seed orders carry the same order number.
    #[error("Duplicate order number: {0}")]
    DuplicateOrderNumber(String),

    /// A seed order's declared total does not equal its computed total.
    #[error("Order {number} declares total {declared}, but its lines total {computed}")]
    TotalMismatch {
        /// The seed order's number.
        number: String,
        /// The total declared in the fixture.
        declared: String,
        /// The total computed from the lines.
        computed: String,
    },

    /// No menu loaded yet.
    #[error("No menu loaded")]
    NoMenu,

    /// No prices loaded yet; currency unknown.
    #[error("No menu loaded yet; currency unknown")]
    NoCurrency,

    /// Menu construction error.
    #[error(transparent)]
    Menu(#[from] MenuError),

    /// Stall directory error.
    #[error(transparent)]
    Stall(#[from] StallError),

    /// Order total computation error.
    #[error(transparent)]
    Pricing(#[from] TotalPriceError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files.
    base_path: PathBuf,

    /// Seeded collections, built as files load.
    stall_directory: StallDirectory,
    menu: Option<Menu<'a>>,
    orders: Vec<Order<'a>>,

    /// String key -> slotmap key mappings for lookups.
    stall_keys: FxHashMap<String, StallKey>,
    menu_keys: FxHashMap<String, MenuItemKey>,

    /// Currency for the fixture set, taken from the first parsed price.
    currency: Option<&'static Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path.
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            stall_directory: StallDirectory::new(),
            menu: None,
            orders: Vec::new(),
            stall_keys: FxHashMap::default(),
            menu_keys: FxHashMap::default(),
            currency: None,
        }
    }

    /// Load stalls from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_stalls(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("stalls").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: StallsFixture = serde_norway::from_str(&contents)?;

        // Insert in sorted key order so seeded collections iterate deterministically.
        let mut entries: Vec<_> = fixture.stalls.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (key, stall_fixture) in entries {
            let mut stall = Stall::new(
                stall_fixture.name,
                stall_fixture.owner,
                stall_fixture.email,
            );
            stall.set_status(stall_fixture.status.into());

            let stall_key = self.stall_directory.add(stall);
            self.stall_keys.insert(key, stall_key);
        }

        Ok(self)
    }

    /// Load menu items from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a price is
    /// malformed, currencies mismatch, or a referenced stall doesn't exist.
    pub fn load_menu(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("menu").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: MenuFixture = serde_norway::from_str(&contents)?;

        // Insert in sorted key order so seeded collections iterate deterministically.
        let mut entries: Vec<_> = fixture.menu.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (key, item_fixture) in entries {
            let price = parse_price(&item_fixture.price)?;
            let currency = price.currency();

            if let Some(existing) = self.currency {
                if existing != currency {
                    return Err(FixtureError::CurrencyMismatch(
                        existing.iso_alpha_code.to_string(),
                        currency.iso_alpha_code.to_string(),
                    ));
                }
            } else {
                self.currency = Some(currency);
            }

            let stall = self
                .stall_keys
                .get(&item_fixture.stall)
                .copied()
                .ok_or_else(|| FixtureError::UnknownStall(item_fixture.stall.clone()))?;

            let mut item = MenuItem::new(item_fixture.name, item_fixture.category, stall, price)?;
            item.set_available(item_fixture.available);

            let menu = self.menu.get_or_insert_with(|| Menu::new(currency));
            let item_key = menu.add(item)?;

            self.menu_keys.insert(key, item_key);
        }

        Ok(self)
    }

    /// Load seed orders from a YAML fixture file. Requires the menu to be
    /// loaded first, since order lines snapshot menu items by string key.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, a referenced
    /// menu item doesn't exist, an order number repeats, or a declared total
    /// does not equal the computed total.
    pub fn load_orders(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("orders").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: OrdersFixture = serde_norway::from_str(&contents)?;

        let mut loaded: Vec<Order<'a>> = Vec::with_capacity(fixture.orders.len());

        {
            let menu = self.menu.as_ref().ok_or(FixtureError::NoMenu)?;

            for order_fixture in fixture.orders {
                let duplicate = self
                    .orders
                    .iter()
                    .chain(loaded.iter())
                    .any(|order| order.number().as_str() == order_fixture.number);

                if duplicate {
                    return Err(FixtureError::DuplicateOrderNumber(order_fixture.number));
                }

                let mut lines = Vec::with_capacity(order_fixture.lines.len());

                for line in &order_fixture.lines {
                    let item_key = self
                        .menu_keys
                        .get(&line.item)
                        .copied()
                        .ok_or_else(|| FixtureError::UnknownMenuItem(line.item.clone()))?;

                    let item = menu.get(item_key)?;

                    lines.push(OrderLine::new(item.name(), line.quantity, *item.price()));
                }

                let order = Order::new(
                    OrderNumber::new(order_fixture.number.clone()),
                    order_fixture.customer,
                    lines,
                    order_fixture.payment.into(),
                    parse_time(&order_fixture.pickup_time)?,
                    parse_time(&order_fixture.placed_at)?,
                    order_fixture.status.into(),
                )?;

                let declared = parse_price(&order_fixture.total)?;

                if declared != order.total() {
                    return Err(FixtureError::TotalMismatch {
                        number: order_fixture.number,
                        declared: declared.to_string(),
                        computed: order.total().to_string(),
                    });
                }

                loaded.push(order);
            }
        }

        self.orders.append(&mut loaded);

        Ok(self)
    }

    /// Load a complete fixture set (stalls, menu, and orders with the same name).
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_stalls(name)?
            .load_menu(name)?
            .load_orders(name)?;

        Ok(fixture)
    }

    /// Build a menu catalog from the loaded items.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError::NoMenu`] if no menu has been loaded.
    pub fn menu(&self) -> Result<Menu<'a>, FixtureError> {
        self.menu.clone().ok_or(FixtureError::NoMenu)
    }

    /// Build a stall directory from the loaded stalls.
    #[must_use]
    pub fn stall_directory(&self) -> StallDirectory {
        self.stall_directory.clone()
    }

    /// Build an order board seeded with the loaded orders, in placement order.
    #[must_use]
    pub fn order_board(&self) -> OrderBoard<'a> {
        let mut board = OrderBoard::new();

        for order in &self.orders {
            board.seed(order.clone());
        }

        board
    }

    /// The loaded seed orders.
    pub fn orders(&self) -> &[Order<'a>] {
        &self.orders
    }

    /// Get a stall key by its string key.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError::UnknownStall`] if the stall is not loaded.
    pub fn stall_key(&self, key: &str) -> Result<StallKey, FixtureError> {
        self.stall_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::UnknownStall(key.to_string()))
    }

    /// Get a menu item key by its string key.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError::UnknownMenuItem`] if the item is not loaded.
    pub fn menu_key(&self, key: &str) -> Result<MenuItemKey, FixtureError> {
        self.menu_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::UnknownMenuItem(key.to_string()))
    }

    /// Get a menu item by its string key.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the item or the menu is not loaded.
    pub fn menu_item(&self, key: &str) -> Result<&MenuItem<'a>, FixtureError> {
        let item_key = self.menu_key(key)?;
        let menu = self.menu.as_ref().ok_or(FixtureError::NoMenu)?;

        Ok(menu.get(item_key)?)
    }

    /// Get the currency of the fixture set.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError::NoCurrency`] if no prices have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a price like "65.00 PHP" into money.
fn parse_price(input: &str) -> Result<Money<'static, Currency>, FixtureError> {
    let (amount, code) = input
        .rsplit_once(' ')
        .ok_or_else(|| FixtureError::InvalidPrice(input.to_string()))?;

    let currency =
        iso::find(code).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))?;

    Money::from_str(amount, currency).map_err(|_err| FixtureError::InvalidPrice(input.to_string()))
}

/// Parse a time like "11:30".
fn parse_time(input: &str) -> Result<NaiveTime, FixtureError> {
    NaiveTime::parse_from_str(input, "%H:%M")
        .map_err(|_err| FixtureError::InvalidTime(input.to_string()))
}
