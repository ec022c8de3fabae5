//! Agora Core - Entity records and shared types for the Agora table store.
//!
//! This crate provides the foundational types used by the storage and query layers:
//!
//! - `Buyer`, `Good`, `Sale`, `Shop`: immutable entity records with an id field
//! - `EntityKind`: the closed set of table kinds and their fixed slot indices
//! - `Entity`: trait tying a record type to its kind
//! - `Error`: Error types for store and analytics operations
//!
//! # Example
//!
//! ```rust
//! use agora_core::{Buyer, Entity, EntityKind, Sale};
//!
//! let buyer = Buyer::with_id(7, "Alice", "Paris", "France");
//! assert_eq!(buyer.id(), 7);
//! assert_eq!(Buyer::KIND, EntityKind::Buyer);
//! assert_eq!(EntityKind::Sale.slot(), 2);
//!
//! let sale = Sale::with_id(1, buyer.id(), 3, 4, 2);
//! assert_eq!(sale.buyer_id, 7);
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod entity;
mod error;
mod id;
mod kind;

pub use entity::{Buyer, Entity, Good, GoodCount, Price, Sale, Shop};
pub use error::{Error, Result};
pub use id::{next_id, set_next_id_if_greater, EntityId};
pub use kind::{EntityKind, SLOT_COUNT};
