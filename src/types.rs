//! Shared primitive IDs and stock enums.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Quantities strictly below this value are reported as [`StockStatus::LowStock`].
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Opaque inventory record identifier.
///
/// Minted once when a record is added and never reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Mints a fresh, time-ordered identifier.
    pub fn mint() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Stock level bucket derived from quantity on hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StockStatus {
    /// At or above [`LOW_STOCK_THRESHOLD`].
    InStock,
    /// Below [`LOW_STOCK_THRESHOLD`].
    LowStock,
}

impl StockStatus {
    /// Classifies a quantity on hand.
    pub fn for_quantity(quantity: u32) -> Self {
        if quantity < LOW_STOCK_THRESHOLD {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    /// Human-facing label, also used in exports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::LowStock => "Low Stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
