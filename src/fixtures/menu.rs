//! Menu Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Wrapper for menu items in YAML.
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// Map of item key -> item fixture.
    pub menu: FxHashMap<String, MenuItemFixture>,
}

/// Menu item fixture from YAML.
#[derive(Debug, Deserialize)]
pub struct MenuItemFixture {
    /// Item name.
    pub name: String,

    /// Item category.
    pub category: String,

    /// String key of the stall offering the item.
    pub stall: String,

    /// Unit price, e.g. "65.00 PHP".
    pub price: String,

    /// Whether the item can currently be ordered. Defaults to true.
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}
