//! Menu
//!
//! The menu catalog: items offered by campus stalls. Listed items are
//! immutable apart from their availability flag, which operators may toggle.

use rusty_money::{Money, iso::Currency};
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

use crate::stalls::StallKey;

new_key_type! {
    /// Menu Item Key
    pub struct MenuItemKey;
}

/// Errors related to the menu catalog.
#[derive(Debug, Error, PartialEq)]
pub enum MenuError {
    /// An item's currency differs from the menu currency (item currency, menu currency).
    #[error("item has currency {0}, but menu has currency {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// An item was listed with a negative unit price.
    #[error("item {0} has a negative unit price")]
    NegativePrice(String),

    /// An item was not found in the menu.
    #[error("menu item {0:?} not found")]
    ItemNotFound(MenuItemKey),
}

/// A single menu item offered by a stall.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem<'a> {
    name: String,
    category: String,
    stall: StallKey,
    price: Money<'a, Currency>,
    available: bool,
}

impl<'a> MenuItem<'a> {
    /// Creates a new available menu item.
    ///
    /// # Errors
    ///
    /// Returns a [`MenuError::NegativePrice`] if the unit price is negative.
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        stall: StallKey,
        price: Money<'a, Currency>,
    ) -> Result<Self, MenuError> {
        let name = name.into();

        if price.amount().is_sign_negative() {
            return Err(MenuError::NegativePrice(name));
        }

        Ok(Self {
            name,
            category: category.into(),
            stall,
            price,
            available: true,
        })
    }

    /// Item name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Item category (e.g. "Main Course", "Beverages").
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The stall offering this item.
    pub fn stall(&self) -> StallKey {
        self.stall
    }

    /// Unit price of the item.
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Whether the item can currently be ordered.
    pub fn is_available(&self) -> bool {
        self.available
    }

    pub(crate) fn set_available(&mut self, available: bool) {
        self.available = available;
    }
}

/// Menu catalog, in insertion order, with a single currency for all items.
#[derive(Debug, Clone)]
pub struct Menu<'a> {
    items: SlotMap<MenuItemKey, MenuItem<'a>>,
    order: Vec<MenuItemKey>,
    currency: &'static Currency,
}

impl<'a> Menu<'a> {
    /// Creates an empty menu priced in the given currency.
    #[must_use]
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            items: SlotMap::with_key(),
            order: Vec::new(),
            currency,
        }
    }

    /// Lists an item on the menu and returns its key.
    ///
    /// # Errors
    ///
    /// Returns a [`MenuError::CurrencyMismatch`] if the item's currency differs
    /// from the menu currency.
    pub fn add(&mut self, item: MenuItem<'a>) -> Result<MenuItemKey, MenuError> {
        let item_currency = item.price().currency();

        if item_currency != self.currency {
            return Err(MenuError::CurrencyMismatch(
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let key = self.items.insert(item);
        self.order.push(key);

        Ok(key)
    }

    /// Delists an item from the menu.
    ///
    /// # Errors
    ///
    /// Returns a [`MenuError::ItemNotFound`] if the item is not on the menu.
    pub fn remove(&mut self, key: MenuItemKey) -> Result<MenuItem<'a>, MenuError> {
        let item = self
            .items
            .remove(key)
            .ok_or(MenuError::ItemNotFound(key))?;

        self.order.retain(|k| *k != key);

        Ok(item)
    }

    /// Toggles an item's availability, returning the new state.
    ///
    /// # Errors
    ///
    /// Returns a [`MenuError::ItemNotFound`] if the item is not on the menu.
    pub fn toggle_availability(&mut self, key: MenuItemKey) -> Result<bool, MenuError> {
        let item = self
            .items
            .get_mut(key)
            .ok_or(MenuError::ItemNotFound(key))?;

        let available = !item.is_available();
        item.set_available(available);

        Ok(available)
    }

    /// Gets an item from the menu.
    ///
    /// # Errors
    ///
    /// Returns a [`MenuError::ItemNotFound`] if the item is not on the menu.
    pub fn get(&self, key: MenuItemKey) -> Result<&MenuItem<'a>, MenuError> {
        self.items.get(key).ok_or(MenuError::ItemNotFound(key))
    }

    /// Iterates over items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (MenuItemKey, &MenuItem<'a>)> {
        self.order
            .iter()
            .filter_map(|key| self.items.get(*key).map(|item| (*key, item)))
    }

    /// Iterates over the items offered by one stall, in insertion order.
    pub fn by_stall(&self, stall: StallKey) -> impl Iterator<Item = (MenuItemKey, &MenuItem<'a>)> {
        self.iter().filter(move |(_, item)| item.stall() == stall)
    }

    /// Number of items on the menu.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the menu is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The currency all menu items are priced in.
    #[must_use]
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{PHP, USD};
    use testresult::TestResult;

    use super::*;

    fn adobo<'a>(stall: StallKey) -> MenuItem<'a> {
        match MenuItem::new(
            "Chicken Adobo Rice",
            "Main Course",
            stall,
            Money::from_minor(6500, PHP),
        ) {
            Ok(item) => item,
            Err(err) => unreachable!("valid item: {err}"),
        }
    }

    #[test]
    fn add_and_get_returns_item() -> TestResult {
        let mut menu = Menu::new(PHP);
        let key = menu.add(adobo(StallKey::default()))?;

        let item = menu.get(key)?;

        assert_eq!(item.name(), "Chicken Adobo Rice");
        assert!(item.is_available());

        Ok(())
    }

    #[test]
    fn add_rejects_currency_mismatch() -> TestResult {
        let mut menu = Menu::new(PHP);
        let item = MenuItem::new(
            "Imported Soda",
            "Beverages",
            StallKey::default(),
            Money::from_minor(200, USD),
        )?;

        let result = menu.add(item);

        assert!(matches!(
            result,
            Err(MenuError::CurrencyMismatch("USD", "PHP"))
        ));

        Ok(())
    }

    #[test]
    fn new_item_rejects_negative_price() {
        let result = MenuItem::new(
            "Broken Entry",
            "Main Course",
            StallKey::default(),
            Money::from_minor(-100, PHP),
        );

        assert!(matches!(result, Err(MenuError::NegativePrice(name)) if name == "Broken Entry"));
    }

    #[test]
    fn toggle_availability_flips_state() -> TestResult {
        let mut menu = Menu::new(PHP);
        let key = menu.add(adobo(StallKey::default()))?;

        assert!(!menu.toggle_availability(key)?);
        assert!(menu.toggle_availability(key)?);

        Ok(())
    }

    #[test]
    fn remove_delists_item_and_preserves_order() -> TestResult {
        let mut menu = Menu::new(PHP);
        let first = menu.add(adobo(StallKey::default()))?;
        let second = menu.add(MenuItem::new(
            "Beef Tapa",
            "Main Course",
            StallKey::default(),
            Money::from_minor(7500, PHP),
        )?)?;
        let third = menu.add(MenuItem::new(
            "Iced Coffee",
            "Beverages",
            StallKey::default(),
            Money::from_minor(4500, PHP),
        )?)?;

        menu.remove(second)?;

        let keys: Vec<MenuItemKey> = menu.iter().map(|(key, _)| key).collect();

        assert_eq!(keys, vec![first, third]);
        assert!(matches!(menu.get(second), Err(MenuError::ItemNotFound(_))));

        Ok(())
    }

    #[test]
    fn by_stall_filters_items() -> TestResult {
        let mut stalls = crate::stalls::StallDirectory::new();
        let canteen = stalls.add(crate::stalls::Stall::new("Main Canteen", "C", "c@x"));
        let coffee = stalls.add(crate::stalls::Stall::new("Coffee Corner", "A", "a@x"));

        let mut menu = Menu::new(PHP);
        menu.add(adobo(canteen))?;
        menu.add(MenuItem::new(
            "Iced Coffee",
            "Beverages",
            coffee,
            Money::from_minor(4500, PHP),
        )?)?;

        let names: Vec<&str> = menu.by_stall(coffee).map(|(_, item)| item.name()).collect();

        assert_eq!(names, vec!["Iced Coffee"]);

        Ok(())
    }
}
