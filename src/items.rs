//! Items

use std::{borrow::Borrow, fmt};

use serde::Deserialize;

use crate::prices::Price;

/// Identifies a product, and therefore its line in the cart.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Creates an id from any string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One product entry in the cart.
///
/// The quantity is always at least one; a line that would drop to zero is
/// removed by the cart instead of being stored.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem {
    id: ItemId,
    name: String,
    unit_price: Price,
    quantity: u32,
}

impl LineItem {
    /// Creates a line with a quantity of one.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, unit_price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            quantity: 1,
        }
    }

    /// Returns the id of the line.
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Returns the display name captured when the line was created.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the unit price captured when the line was created.
    pub fn unit_price(&self) -> &Price {
        &self.unit_price
    }

    /// Returns the quantity.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Adds one unit, returning the new quantity.
    pub(crate) fn increment(&mut self) -> u32 {
        self.quantity = self.quantity.saturating_add(1);
        self.quantity
    }

    /// Applies a signed change, returning the new quantity or `None` when the
    /// line should be removed.
    pub(crate) fn apply_delta(&mut self, delta: i64) -> Option<u32> {
        let next = i64::from(self.quantity).saturating_add(delta);

        if next <= 0 {
            return None;
        }

        self.quantity = u32::try_from(next).unwrap_or(u32::MAX);

        Some(self.quantity)
    }
}
