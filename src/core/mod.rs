//! In-memory authoritative inventory store and derived aggregates.

/// Headline figures and per-category totals.
pub mod aggregates;
/// Authoritative inventory store.
pub mod store;
