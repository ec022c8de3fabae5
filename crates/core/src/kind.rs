//! Entity kinds and their fixed table slots.

use crate::error::{Error, Result};
use core::fmt;
use core::str::FromStr;

/// Number of table slots; one per entity kind.
pub const SLOT_COUNT: usize = 4;

/// The closed set of entity kinds a store can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Buyer,
    Good,
    Sale,
    Shop,
}

impl EntityKind {
    /// All kinds in slot order.
    pub const ALL: [EntityKind; SLOT_COUNT] = [
        EntityKind::Buyer,
        EntityKind::Good,
        EntityKind::Sale,
        EntityKind::Shop,
    ];

    /// Resolves the kind to its fixed slot index.
    #[inline]
    pub const fn slot(self) -> usize {
        match self {
            EntityKind::Buyer => 0,
            EntityKind::Good => 1,
            EntityKind::Sale => 2,
            EntityKind::Shop => 3,
        }
    }

    /// Inverse of [`EntityKind::slot`].
    pub fn from_slot(slot: usize) -> Result<Self> {
        Self::ALL
            .get(slot)
            .copied()
            .ok_or_else(|| Error::unknown_entity_kind(alloc::format!("slot {}", slot)))
    }

    /// Singular lower-case name.
    pub const fn name(self) -> &'static str {
        match self {
            EntityKind::Buyer => "buyer",
            EntityKind::Good => "good",
            EntityKind::Sale => "sale",
            EntityKind::Shop => "shop",
        }
    }

    /// File name used when a whole directory of tables is loaded or saved.
    pub const fn file_name(self) -> &'static str {
        match self {
            EntityKind::Buyer => "buyers.json",
            EntityKind::Good => "goods.json",
            EntityKind::Sale => "sales.json",
            EntityKind::Shop => "shops.json",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    /// Accepts singular or plural names, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| {
                let name = kind.name();
                trimmed.eq_ignore_ascii_case(name)
                    || trimmed
                        .strip_suffix(&['s', 'S'][..])
                        .is_some_and(|singular| singular.eq_ignore_ascii_case(name))
            })
            .ok_or_else(|| Error::unknown_entity_kind(trimmed))
    }
}
