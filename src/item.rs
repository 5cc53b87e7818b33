//! Inventory record, draft, and form-input parsing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    core::store::StoreError,
    types::{ItemId, StockStatus},
};

const MSG_REQUIRED: &str = "All fields are required.";
const MSG_NON_NEGATIVE: &str = "Please enter valid, non-negative numbers for price and quantity.";
pub(crate) const MSG_POSITIVE_SALE: &str = "Please enter a valid, positive quantity.";
const MSG_TOO_LARGE: &str = "Price and quantity are too large to value.";
pub(crate) const MSG_COLLECTION_TOO_LARGE: &str = "Total inventory value is too large to track.";

/// Fully materialized inventory record.
///
/// `status` and `total_value` are derived from `price` and `quantity` at
/// construction and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RecordFields")]
pub struct InventoryRecord {
    id: ItemId,
    category: String,
    name: String,
    price: Decimal,
    quantity: u32,
    status: StockStatus,
    total_value: Decimal,
}

/// Caller-supplied fields of a record, used for seeding from saved data.
/// Derived fields present in the input are ignored and recomputed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordFields {
    id: ItemId,
    category: String,
    name: String,
    price: Decimal,
    quantity: i64,
}

impl TryFrom<RecordFields> for InventoryRecord {
    type Error = StoreError;

    fn try_from(value: RecordFields) -> Result<Self, Self::Error> {
        Self::from_draft(
            value.id,
            ItemDraft {
                category: value.category,
                name: value.name,
                price: value.price,
                quantity: value.quantity,
            },
        )
    }
}

impl InventoryRecord {
    /// Builds a record from a validated draft, computing derived fields.
    pub fn from_draft(id: ItemId, draft: ItemDraft) -> Result<Self, StoreError> {
        let quantity = draft.validate()?;
        Self::derive(id, draft.category, draft.name, draft.price, quantity)
    }

    /// Returns a copy with `quantity` replaced and derived fields recomputed.
    pub(crate) fn with_quantity(&self, quantity: u32) -> Result<Self, StoreError> {
        Self::derive(
            self.id,
            self.category.clone(),
            self.name.clone(),
            self.price,
            quantity,
        )
    }

    fn derive(
        id: ItemId,
        category: String,
        name: String,
        price: Decimal,
        quantity: u32,
    ) -> Result<Self, StoreError> {
        let total_value = price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| StoreError::Validation(MSG_TOO_LARGE.to_string()))?;
        Ok(Self {
            id,
            category,
            name,
            price,
            quantity,
            status: StockStatus::for_quantity(quantity),
            total_value,
        })
    }

    /// Stable record identifier.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Free-text category.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Free-text product name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Units on hand.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Derived stock bucket.
    pub fn status(&self) -> StockStatus {
        self.status
    }

    /// Derived `price × quantity`.
    pub fn total_value(&self) -> Decimal {
        self.total_value
    }

    /// Draft carrying this record's current mutable fields.
    pub fn to_draft(&self) -> ItemDraft {
        ItemDraft {
            category: self.category.clone(),
            name: self.name.clone(),
            price: self.price,
            quantity: i64::from(self.quantity),
        }
    }
}

/// Add/edit payload used to create or replace an [`InventoryRecord`].
///
/// `quantity` is signed so that negative input reaches validation instead of
/// being unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    /// Free-text category, must be non-blank.
    pub category: String,
    /// Free-text product name, must be non-blank.
    pub name: String,
    /// Unit price, must be non-negative.
    pub price: Decimal,
    /// Units on hand, must be non-negative.
    pub quantity: i64,
}

impl ItemDraft {
    /// Parses raw form input into a draft.
    pub fn parse(
        category: &str,
        name: &str,
        price: &str,
        quantity: &str,
    ) -> Result<Self, StoreError> {
        if [category, name, price, quantity]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(StoreError::Validation(MSG_REQUIRED.to_string()));
        }

        let price: Decimal = price
            .trim()
            .parse()
            .map_err(|_| StoreError::Validation(MSG_NON_NEGATIVE.to_string()))?;
        let quantity: i64 = quantity
            .trim()
            .parse()
            .map_err(|_| StoreError::Validation(MSG_NON_NEGATIVE.to_string()))?;

        let draft = Self {
            category: category.to_string(),
            name: name.to_string(),
            price,
            quantity,
        };
        draft.validate()?;
        Ok(draft)
    }

    /// Checks every field and returns the quantity narrowed to its stored width.
    pub fn validate(&self) -> Result<u32, StoreError> {
        if self.category.trim().is_empty() || self.name.trim().is_empty() {
            return Err(StoreError::Validation(MSG_REQUIRED.to_string()));
        }
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(StoreError::Validation(MSG_NON_NEGATIVE.to_string()));
        }
        let quantity = u32::try_from(self.quantity)
            .map_err(|_| StoreError::Validation(MSG_NON_NEGATIVE.to_string()))?;
        self.price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| StoreError::Validation(MSG_TOO_LARGE.to_string()))?;
        Ok(quantity)
    }
}

/// Parses the raw quantity typed into the sale form.
///
/// Only checks that the value is a positive integer; the stock ceiling is
/// enforced by [`crate::core::store::InventoryStore::record_sale`].
pub fn parse_sale_quantity(text: &str) -> Result<i64, StoreError> {
    match text.trim().parse::<i64>() {
        Ok(q) if q > 0 => Ok(q),
        _ => Err(StoreError::Validation(MSG_POSITIVE_SALE.to_string())),
    }
}
