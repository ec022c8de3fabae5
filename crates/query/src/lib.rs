//! Agora Query - Analytic queries over the Agora table store.
//!
//! This crate provides the read-only analytics layer:
//!
//! - `AnalyticsEngine`: the seven cross-table aggregate queries
//! - `Query`: query identifiers and the tables each one requires
//! - `AnalyticsConfig` / `GapPolicy`: what to do when a sale references a
//!   missing buyer, good or shop
//!
//! # Example
//!
//! ```rust
//! use agora_core::{Good, Sale};
//! use agora_query::AnalyticsEngine;
//! use agora_storage::TableStore;
//!
//! let mut store = TableStore::new();
//! store.create_table::<Good>().unwrap();
//! store.create_table::<Sale>().unwrap();
//! store.insert(Good::with_id(1, "Pen", 5, "Office")).unwrap();
//! store.insert(Sale::with_id(1, 1, 1, 1, 3)).unwrap();
//!
//! let engine = AnalyticsEngine::new();
//! assert_eq!(engine.total_sales_value(&store).unwrap(), 15);
//! ```

mod config;
mod engine;
mod lookup;
mod query;

pub use config::{AnalyticsConfig, GapPolicy};
pub use engine::AnalyticsEngine;
pub use query::Query;
