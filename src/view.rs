//! Search and sort over a copy of the records, for table-style display.
//!
//! Nothing here touches the store; exports always use canonical order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::item::InventoryRecord;

/// Column a table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    /// Category text.
    Category,
    /// Product name text.
    Name,
    /// Unit price.
    Price,
    /// Units on hand.
    Quantity,
    /// Stock status, in-stock first when ascending.
    Status,
    /// Derived total value.
    TotalValue,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Smallest first.
    Asc,
    /// Largest first.
    Desc,
}

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Column.
    pub key: SortKey,
    /// Direction.
    pub order: SortOrder,
}

impl SortSpec {
    /// Next sort state after a header click on `key`: an ascending sort on the
    /// same column flips to descending, anything else sorts ascending.
    pub fn request(current: Option<SortSpec>, key: SortKey) -> SortSpec {
        let order = match current {
            Some(SortSpec {
                key: cur,
                order: SortOrder::Asc,
            }) if cur == key => SortOrder::Desc,
            _ => SortOrder::Asc,
        };
        SortSpec { key, order }
    }

    fn compare(&self, a: &InventoryRecord, b: &InventoryRecord) -> Ordering {
        let ord = match self.key {
            SortKey::Category => a.category().cmp(b.category()),
            SortKey::Name => a.name().cmp(b.name()),
            SortKey::Price => a.price().cmp(&b.price()),
            SortKey::Quantity => a.quantity().cmp(&b.quantity()),
            SortKey::Status => a.status().cmp(&b.status()),
            SortKey::TotalValue => a.total_value().cmp(&b.total_value()),
        };
        match self.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    }
}

/// Filter and sort settings for a displayed copy of the records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewQuery {
    /// Case-insensitive substring matched against name or category.
    pub search: String,
    /// Optional sort; `None` keeps canonical order.
    pub sort: Option<SortSpec>,
}

impl ViewQuery {
    /// Returns the matching records, sorted; equal keys keep input order.
    pub fn apply<'a>(
        &self,
        records: impl IntoIterator<Item = &'a InventoryRecord>,
    ) -> Vec<InventoryRecord> {
        let needle = self.search.trim().to_lowercase();
        let mut items: Vec<InventoryRecord> = records
            .into_iter()
            .filter(|rec| {
                needle.is_empty()
                    || rec.name().to_lowercase().contains(&needle)
                    || rec.category().to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        if let Some(spec) = self.sort {
            items.sort_by(|a, b| spec.compare(a, b));
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::{item::ItemDraft, types::ItemId};

    fn rec(category: &str, name: &str, price: i64, quantity: i64) -> InventoryRecord {
        InventoryRecord::from_draft(
            ItemId::mint(),
            ItemDraft {
                category: category.to_string(),
                name: name.to_string(),
                price: Decimal::from(price),
                quantity,
            },
        )
        .unwrap()
    }

    fn names(items: &[InventoryRecord]) -> Vec<&str> {
        items.iter().map(|r| r.name()).collect()
    }

    fn sample() -> Vec<InventoryRecord> {
        vec![
            rec("Dresses", "Red Gown", 5000, 3),
            rec("Shoes", "Loafer", 1500, 12),
            rec("Bags", "Evening Clutch", 800, 30),
            rec("Dresses", "Maxi Dress", 2500, 12),
        ]
    }

    #[test]
    fn search_matches_name_or_category_case_insensitively() {
        let data = sample();
        let q = ViewQuery {
            search: "DRESS".to_string(),
            sort: None,
        };
        assert_eq!(names(&q.apply(&data)), vec!["Red Gown", "Maxi Dress"]);

        let q = ViewQuery {
            search: "clutch".to_string(),
            sort: None,
        };
        assert_eq!(names(&q.apply(&data)), vec!["Evening Clutch"]);
    }

    #[test]
    fn sort_is_stable_and_reversible() {
        let data = sample();
        let mut q = ViewQuery {
            search: String::new(),
            sort: Some(SortSpec::request(None, SortKey::Quantity)),
        };
        assert_eq!(
            names(&q.apply(&data)),
            vec!["Red Gown", "Loafer", "Maxi Dress", "Evening Clutch"]
        );

        q.sort = Some(SortSpec::request(q.sort, SortKey::Quantity));
        assert_eq!(q.sort.unwrap().order, SortOrder::Desc);
        assert_eq!(
            names(&q.apply(&data)),
            vec!["Evening Clutch", "Loafer", "Maxi Dress", "Red Gown"]
        );
    }

    #[test]
    fn request_on_new_column_resets_to_ascending() {
        let desc = SortSpec {
            key: SortKey::Price,
            order: SortOrder::Desc,
        };
        assert_eq!(
            SortSpec::request(Some(desc), SortKey::Price).order,
            SortOrder::Asc
        );
        assert_eq!(
            SortSpec::request(Some(desc), SortKey::Name),
            SortSpec {
                key: SortKey::Name,
                order: SortOrder::Asc
            }
        );
    }

    #[test]
    fn status_sort_puts_low_stock_last_when_ascending() {
        let data = sample();
        let q = ViewQuery {
            search: String::new(),
            sort: Some(SortSpec {
                key: SortKey::Status,
                order: SortOrder::Asc,
            }),
        };
        assert_eq!(names(&q.apply(&data)).last(), Some(&"Red Gown"));
    }
}
