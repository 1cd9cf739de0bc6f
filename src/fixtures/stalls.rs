//! Stall Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::stalls::StallStatus;

/// Wrapper for stalls in YAML.
#[derive(Debug, Deserialize)]
pub struct StallsFixture {
    /// Map of stall key -> stall fixture.
    pub stalls: FxHashMap<String, StallFixture>,
}

/// Stall fixture from YAML.
#[derive(Debug, Deserialize)]
pub struct StallFixture {
    /// Stall name.
    pub name: String,

    /// Owner name.
    pub owner: String,

    /// Owner contact email.
    pub email: String,

    /// Whether the stall is taking orders. Defaults to active.
    #[serde(default)]
    pub status: StallStatusFixture,
}

/// Stall status from YAML.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StallStatusFixture {
    /// Taking orders.
    #[default]
    Active,
    /// Not taking orders.
    Inactive,
}

impl From<StallStatusFixture> for StallStatus {
    fn from(status: StallStatusFixture) -> Self {
        match status {
            StallStatusFixture::Active => Self::Active,
            StallStatusFixture::Inactive => Self::Inactive,
        }
    }
}
