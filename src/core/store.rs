use std::collections::VecDeque;

use hashbrown::HashMap;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    core::aggregates::{self, Aggregates, CategoryTotal},
    item::{InventoryRecord, ItemDraft, MSG_COLLECTION_TOO_LARGE, MSG_POSITIVE_SALE},
    types::ItemId,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("inventory record {0} not found")]
    NotFound(ItemId),
    #[error("inventory record {0} already exists")]
    DuplicateId(ItemId),
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[derive(Debug, Default)]
pub struct InventoryStore {
    records: HashMap<ItemId, InventoryRecord>,
    // Most-recent-first.
    order: VecDeque<ItemId>,
    // Sum of every record's total value; never exceeds `Decimal::MAX`.
    total_value: Decimal,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a store with records already in canonical (display) order.
    pub fn from_records(records: Vec<InventoryRecord>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for rec in records {
            let id = rec.id();
            if store.records.contains_key(&id) {
                return Err(StoreError::DuplicateId(id));
            }
            store.total_value = store.total_after(Decimal::ZERO, rec.total_value())?;
            store.order.push_back(id);
            store.records.insert(id, rec);
        }
        Ok(store)
    }

    pub fn add(&mut self, draft: ItemDraft) -> Result<ItemId, StoreError> {
        let mut id = ItemId::mint();
        while self.records.contains_key(&id) {
            id = ItemId::mint();
        }

        let rec = InventoryRecord::from_draft(id, draft)?;
        let total_value = self.total_after(Decimal::ZERO, rec.total_value())?;
        self.order.push_front(id);
        self.records.insert(id, rec);
        self.total_value = total_value;
        tracing::debug!(%id, "inventory record added");
        Ok(id)
    }

    pub fn edit(&mut self, id: ItemId, draft: ItemDraft) -> Result<&InventoryRecord, StoreError> {
        let current = self.records.get(&id).ok_or(StoreError::NotFound(id))?;
        let next = InventoryRecord::from_draft(id, draft)?;
        let total_value = self.total_after(current.total_value(), next.total_value())?;

        let slot = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        *slot = next;
        self.total_value = total_value;
        tracing::debug!(%id, "inventory record edited");
        Ok(slot)
    }

    /// Removes a record. `NotFound` is benign for callers that already
    /// confirmed the deletion.
    pub fn delete(&mut self, id: ItemId) -> Result<InventoryRecord, StoreError> {
        let rec = self.records.remove(&id).ok_or(StoreError::NotFound(id))?;
        self.total_value -= rec.total_value();
        if let Some(pos) = self.order.iter().position(|x| *x == id) {
            self.order.remove(pos);
        }
        tracing::debug!(%id, "inventory record deleted");
        Ok(rec)
    }

    pub fn record_sale(
        &mut self,
        id: ItemId,
        quantity_sold: i64,
    ) -> Result<&InventoryRecord, StoreError> {
        let rec = self.records.get(&id).ok_or(StoreError::NotFound(id))?;
        if quantity_sold <= 0 {
            return Err(StoreError::Validation(MSG_POSITIVE_SALE.to_string()));
        }
        let available = rec.quantity();
        let sold = u32::try_from(quantity_sold)
            .ok()
            .filter(|q| *q <= available)
            .ok_or_else(|| {
                StoreError::Validation(format!(
                    "Cannot sell more than the {available} items in stock."
                ))
            })?;
        let next = rec.with_quantity(available - sold)?;
        let total_value = self.total_after(rec.total_value(), next.total_value())?;

        let slot = self.records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        *slot = next;
        self.total_value = total_value;
        tracing::debug!(%id, sold, remaining = slot.quantity(), "sale recorded");
        Ok(slot)
    }

    pub fn get(&self, id: ItemId) -> Option<&InventoryRecord> {
        self.records.get(&id)
    }

    pub fn get_cloned(&self, id: ItemId) -> Option<InventoryRecord> {
        self.get(id).cloned()
    }

    /// Records in canonical order.
    pub fn records(&self) -> impl Iterator<Item = &InventoryRecord> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Cloned records in canonical order, for read-only consumers.
    pub fn snapshot(&self) -> Vec<InventoryRecord> {
        self.records().cloned().collect()
    }

    pub fn ordered_ids(&self) -> Vec<ItemId> {
        self.order.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Collection total with one record's value swapped from `removed` to
    /// `added`. Fails when the result would not fit in a `Decimal`.
    fn total_after(&self, removed: Decimal, added: Decimal) -> Result<Decimal, StoreError> {
        (self.total_value - removed)
            .checked_add(added)
            .ok_or_else(|| StoreError::Validation(MSG_COLLECTION_TOO_LARGE.to_string()))
    }

    /// Running sum of every record's total value.
    pub fn total_value(&self) -> Decimal {
        self.total_value
    }

    pub fn aggregates(&self) -> Aggregates {
        aggregates::compute(self.records())
    }

    pub fn category_totals(&self) -> Vec<CategoryTotal> {
        aggregates::category_totals(self.records())
    }

    pub fn export_csv(&self) -> String {
        crate::export::render_csv(self.records())
    }
}
