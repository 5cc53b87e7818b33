//! Authoritative in-memory inventory store for a small retail dashboard.
//!
//! # Examples
//!
//! In-memory usage with [`core::store::InventoryStore`]:
//! ```
//! use rust_decimal::Decimal;
//! use stocklog::{core::store::InventoryStore, item::ItemDraft, types::StockStatus};
//!
//! let mut store = InventoryStore::new();
//! let id = store.add(ItemDraft {
//!     category: "Dresses".to_string(),
//!     name: "Red Gown".to_string(),
//!     price: Decimal::from(5000),
//!     quantity: 3,
//! }).expect("add");
//!
//! let rec = store.record_sale(id, 2).expect("sale");
//! assert_eq!(rec.quantity(), 1);
//! assert_eq!(rec.total_value(), Decimal::from(5000));
//! assert_eq!(rec.status(), StockStatus::LowStock);
//! assert!(store.record_sale(id, 5).is_err());
//! ```
//!
//! Runtime usage with the HTTP insight generator:
//! ```no_run
//! use stocklog::{
//!     config::Config,
//!     core::store::InventoryStore,
//!     insight::gemini::GeminiGenerator,
//!     runtime::handle::spawn_inventory,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let cfg = Config::from_env();
//! let generator = GeminiGenerator::new(cfg.insight.clone()).expect("generator");
//! let handle = spawn_inventory(InventoryStore::new(), generator, cfg.runtime.clone());
//! let text = handle.generate_insights().await;
//! println!("{text:?}");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```

/// Environment-driven configuration.
pub mod config;
/// Core in-memory store and aggregates.
pub mod core;
/// CSV export.
pub mod export;
/// External insight generation.
pub mod insight;
/// Inventory records and drafts.
pub mod item;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Tracing subscriber setup.
pub mod telemetry;
/// Shared primitive types and enums.
pub mod types;
/// Presentation-side search and sort.
pub mod view;
