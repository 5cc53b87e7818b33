use std::cmp::Ordering;

use hashbrown::{HashMap, HashSet};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{item::InventoryRecord, types::StockStatus};

/// Dashboard headline figures, computed fresh from current records.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregates {
    /// Sum of every record's total value.
    pub total_value: Decimal,
    /// Sum of quantities on hand.
    pub total_items: u64,
    /// Records currently classed as low stock.
    pub low_stock_count: usize,
    /// Distinct category strings.
    pub category_count: usize,
}

/// Total value held in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    /// Category name.
    pub category: String,
    /// Sum of total values in the category.
    pub total_value: Decimal,
}

/// Sums cannot overflow: every record is non-negative and
/// [`InventoryStore`](crate::core::store::InventoryStore) rejects any mutation
/// whose collection total would exceed `Decimal::MAX`.
pub(crate) fn compute<'a>(records: impl IntoIterator<Item = &'a InventoryRecord>) -> Aggregates {
    let mut out = Aggregates::default();
    let mut categories = HashSet::<&str>::new();

    for rec in records {
        out.total_value += rec.total_value();
        out.total_items += u64::from(rec.quantity());
        if rec.status() == StockStatus::LowStock {
            out.low_stock_count += 1;
        }
        categories.insert(rec.category());
    }

    out.category_count = categories.len();
    out
}

/// Per-category value, highest first; ties ordered by category name.
pub(crate) fn category_totals<'a>(
    records: impl IntoIterator<Item = &'a InventoryRecord>,
) -> Vec<CategoryTotal> {
    let mut totals = HashMap::<&str, Decimal>::new();
    for rec in records {
        *totals.entry(rec.category()).or_default() += rec.total_value();
    }

    let mut out: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total_value)| CategoryTotal {
            category: category.to_string(),
            total_value,
        })
        .collect();
    out.sort_by(|a, b| match b.total_value.cmp(&a.total_value) {
        Ordering::Equal => a.category.cmp(&b.category),
        other => other,
    });
    out
}
