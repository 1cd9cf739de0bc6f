//! Stalls
//!
//! The campus stall directory: which stalls exist, who runs them, and whether
//! they are currently taking orders.

use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

new_key_type! {
    /// Stall Key
    pub struct StallKey;
}

/// Errors related to the stall directory.
#[derive(Debug, Error, PartialEq)]
pub enum StallError {
    /// A stall was not found in the directory.
    #[error("stall {0:?} not found")]
    StallNotFound(StallKey),
}

/// Whether a stall is currently taking orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StallStatus {
    /// Taking orders.
    Active,
    /// Not taking orders.
    Inactive,
}

impl StallStatus {
    /// Returns the opposite status.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

/// A food stall and its owner contact details.
#[derive(Debug, Clone)]
pub struct Stall {
    name: String,
    owner: String,
    email: String,
    status: StallStatus,
}

impl Stall {
    /// Creates a new active stall.
    pub fn new(
        name: impl Into<String>,
        owner: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            email: email.into(),
            status: StallStatus::Active,
        }
    }

    /// Stall name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owner name.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Owner contact email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Current status.
    pub fn status(&self) -> StallStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: StallStatus) {
        self.status = status;
    }
}

/// Directory of stalls, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct StallDirectory {
    stalls: SlotMap<StallKey, Stall>,
    order: Vec<StallKey>,
}

impl StallDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stall and returns its key.
    pub fn add(&mut self, stall: Stall) -> StallKey {
        let key = self.stalls.insert(stall);
        self.order.push(key);
        key
    }

    /// Removes a stall from the directory.
    ///
    /// # Errors
    ///
    /// Returns a [`StallError::StallNotFound`] if the stall is not in the directory.
    pub fn remove(&mut self, key: StallKey) -> Result<Stall, StallError> {
        let stall = self
            .stalls
            .remove(key)
            .ok_or(StallError::StallNotFound(key))?;

        self.order.retain(|k| *k != key);

        Ok(stall)
    }

    /// Toggles a stall between active and inactive, returning the new status.
    ///
    /// # Errors
    ///
    /// Returns a [`StallError::StallNotFound`] if the stall is not in the directory.
    pub fn toggle_status(&mut self, key: StallKey) -> Result<StallStatus, StallError> {
        let stall = self
            .stalls
            .get_mut(key)
            .ok_or(StallError::StallNotFound(key))?;

        let status = stall.status().toggled();
        stall.set_status(status);

        Ok(status)
    }

    /// Gets a stall from the directory.
    ///
    /// # Errors
    ///
    /// Returns a [`StallError::StallNotFound`] if the stall is not in the directory.
    pub fn get(&self, key: StallKey) -> Result<&Stall, StallError> {
        self.stalls.get(key).ok_or(StallError::StallNotFound(key))
    }

    /// Iterates over stalls in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (StallKey, &Stall)> {
        self.order
            .iter()
            .filter_map(|key| self.stalls.get(*key).map(|stall| (*key, stall)))
    }

    /// Number of stalls in the directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stalls.len()
    }

    /// Whether the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stalls.is_empty()
    }
}
