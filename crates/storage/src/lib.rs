//! Agora Storage - Type-indexed table store for the Agora entities.
//!
//! This crate provides the storage layer:
//!
//! - `TableStore`: four fixed table slots addressed by entity type or kind
//! - `AnyTable`: one slot's contents, tagged with its kind
//! - `TableEntity`: binds each entity type to its variant of `AnyTable`
//! - `StoreConfig`: persistence options
//!
//! The store performs no cross-table validation; a sale may reference ids
//! that exist in no other table.
//!
//! # Example
//!
//! ```rust
//! use agora_core::{Buyer, EntityKind};
//! use agora_storage::TableStore;
//!
//! let mut store = TableStore::new();
//! store.create_table::<Buyer>().unwrap();
//! store.insert(Buyer::with_id(1, "Alice", "Paris", "France")).unwrap();
//!
//! assert_eq!(store.get_table::<Buyer>().unwrap().len(), 1);
//! assert!(store.create_table_kind(EntityKind::Buyer).is_err());
//! ```

mod codec;
mod config;
mod store;
mod table;

pub use codec::{decode_table, encode_table};
pub use config::StoreConfig;
pub use store::{resolve_slot, TableStore};
pub use table::{AnyTable, TableEntity};
