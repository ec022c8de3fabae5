//! Tagged table contents.
//!
//! A created slot holds an `AnyTable`. The variant always matches the slot's
//! kind; typed access goes through `TableEntity`, which matches on the variant
//! instead of casting.

use agora_core::{Buyer, Entity, EntityId, EntityKind, Good, Sale, Shop};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// The rows of one table, in insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnyTable {
    Buyers(Vec<Buyer>),
    Goods(Vec<Good>),
    Sales(Vec<Sale>),
    Shops(Vec<Shop>),
}

impl AnyTable {
    /// Creates an empty table of the given kind.
    pub fn empty(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Buyer => AnyTable::Buyers(Vec::new()),
            EntityKind::Good => AnyTable::Goods(Vec::new()),
            EntityKind::Sale => AnyTable::Sales(Vec::new()),
            EntityKind::Shop => AnyTable::Shops(Vec::new()),
        }
    }

    /// Returns the kind of rows held.
    pub fn kind(&self) -> EntityKind {
        match self {
            AnyTable::Buyers(_) => EntityKind::Buyer,
            AnyTable::Goods(_) => EntityKind::Good,
            AnyTable::Sales(_) => EntityKind::Sale,
            AnyTable::Shops(_) => EntityKind::Shop,
        }
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        match self {
            AnyTable::Buyers(rows) => rows.len(),
            AnyTable::Goods(rows) => rows.len(),
            AnyTable::Sales(rows) => rows.len(),
            AnyTable::Shops(rows) => rows.len(),
        }
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the largest id in the table.
    pub fn max_id(&self) -> Option<EntityId> {
        fn max_of<T: Entity>(rows: &[T]) -> Option<EntityId> {
            rows.iter().map(Entity::id).max()
        }
        match self {
            AnyTable::Buyers(rows) => max_of(rows),
            AnyTable::Goods(rows) => max_of(rows),
            AnyTable::Sales(rows) => max_of(rows),
            AnyTable::Shops(rows) => max_of(rows),
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for agora_core::Buyer {}
    impl Sealed for agora_core::Good {}
    impl Sealed for agora_core::Sale {}
    impl Sealed for agora_core::Shop {}
}

/// An entity type that owns one `AnyTable` variant.
pub trait TableEntity: Entity + Serialize + DeserializeOwned + sealed::Sealed {
    /// Wraps rows into this type's variant.
    fn wrap(rows: Vec<Self>) -> AnyTable;

    /// Borrows the rows if `table` is this type's variant.
    fn rows(table: &AnyTable) -> Option<&Vec<Self>>;

    /// Mutably borrows the rows if `table` is this type's variant.
    fn rows_mut(table: &mut AnyTable) -> Option<&mut Vec<Self>>;
}

macro_rules! impl_table_entity {
    ($ty:ty, $variant:ident) => {
        impl TableEntity for $ty {
            fn wrap(rows: Vec<Self>) -> AnyTable {
                AnyTable::$variant(rows)
            }

            fn rows(table: &AnyTable) -> Option<&Vec<Self>> {
                match table {
                    AnyTable::$variant(rows) => Some(rows),
                    _ => None,
                }
            }

            fn rows_mut(table: &mut AnyTable) -> Option<&mut Vec<Self>> {
                match table {
                    AnyTable::$variant(rows) => Some(rows),
                    _ => None,
                }
            }
        }
    };
}

impl_table_entity!(Buyer, Buyers);
impl_table_entity!(Good, Goods);
impl_table_entity!(Sale, Sales);
impl_table_entity!(Shop, Shops);
