//! Runtime event stream payloads.

use crate::types::ItemId;

/// Events emitted from the single-writer runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryEvent {
    /// A new record was added.
    Added {
        /// Added record id.
        id: ItemId,
    },
    /// A record's fields were replaced.
    Updated {
        /// Edited record id.
        id: ItemId,
    },
    /// A record was removed.
    Deleted {
        /// Removed record id.
        id: ItemId,
    },
    /// Stock was decremented by a sale.
    SaleRecorded {
        /// Sold record id.
        id: ItemId,
        /// Units sold.
        quantity_sold: u32,
    },
    /// An insight request started over a snapshot of this many records.
    InsightsStarted {
        /// Snapshot size.
        records: usize,
    },
    /// The in-flight insight request produced text.
    InsightsReady,
    /// The in-flight insight request failed.
    InsightsFailed {
        /// Human-readable reason.
        message: String,
    },
}
