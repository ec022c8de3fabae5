//! Entity records stored in the four tables.
//!
//! Records are plain values. `new` assigns the next id of the record's kind,
//! `with_id` rebuilds a record whose id is already known (for example one read
//! back from a JSON dump). Id uniqueness is not checked by either path.

use crate::id::{next_id, EntityId};
use crate::kind::EntityKind;
use alloc::string::String;
use serde::{Deserialize, Serialize};

/// Unit price of a good.
pub type Price = u64;

/// Number of units moved by one sale.
pub type GoodCount = u32;

/// A record type that lives in one of the store's tables.
pub trait Entity: Clone + core::fmt::Debug {
    /// The table kind this record belongs to.
    const KIND: EntityKind;

    /// Returns the record id.
    fn id(&self) -> EntityId;
}

/// A customer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
    pub id: EntityId,
    pub name: String,
    pub city: String,
    pub country: String,
}

impl Buyer {
    /// Creates a buyer with a freshly assigned id.
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self::with_id(next_id(EntityKind::Buyer), name, city, country)
    }

    /// Creates a buyer with an explicit id.
    pub fn with_id(
        id: EntityId,
        name: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            city: city.into(),
            country: country.into(),
        }
    }
}

impl Entity for Buyer {
    const KIND: EntityKind = EntityKind::Buyer;

    #[inline]
    fn id(&self) -> EntityId {
        self.id
    }
}

/// A product offered for sale.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Good {
    pub id: EntityId,
    pub name: String,
    pub price: Price,
    pub category: String,
}

impl Good {
    /// Creates a good with a freshly assigned id.
    pub fn new(name: impl Into<String>, price: Price, category: impl Into<String>) -> Self {
        Self::with_id(next_id(EntityKind::Good), name, price, category)
    }

    /// Creates a good with an explicit id.
    pub fn with_id(
        id: EntityId,
        name: impl Into<String>,
        price: Price,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category: category.into(),
        }
    }
}

impl Entity for Good {
    const KIND: EntityKind = EntityKind::Good;

    #[inline]
    fn id(&self) -> EntityId {
        self.id
    }
}

/// One purchase: `good_count` units of a good bought by a buyer in a shop.
///
/// The three references are logical foreign keys and are never validated on
/// construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: EntityId,
    pub buyer_id: EntityId,
    pub good_id: EntityId,
    pub shop_id: EntityId,
    pub good_count: GoodCount,
}

impl Sale {
    /// Creates a sale with a freshly assigned id.
    pub fn new(
        buyer_id: EntityId,
        good_id: EntityId,
        shop_id: EntityId,
        good_count: GoodCount,
    ) -> Self {
        Self::with_id(next_id(EntityKind::Sale), buyer_id, good_id, shop_id, good_count)
    }

    /// Creates a sale with an explicit id.
    pub fn with_id(
        id: EntityId,
        buyer_id: EntityId,
        good_id: EntityId,
        shop_id: EntityId,
        good_count: GoodCount,
    ) -> Self {
        Self {
            id,
            buyer_id,
            good_id,
            shop_id,
            good_count,
        }
    }
}

impl Entity for Sale {
    const KIND: EntityKind = EntityKind::Sale;

    #[inline]
    fn id(&self) -> EntityId {
        self.id
    }
}

/// A point of sale.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    pub id: EntityId,
    pub name: String,
    pub city: String,
    pub country: String,
}

impl Shop {
    /// Creates a shop with a freshly assigned id.
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self::with_id(next_id(EntityKind::Shop), name, city, country)
    }

    /// Creates a shop with an explicit id.
    pub fn with_id(
        id: EntityId,
        name: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            city: city.into(),
            country: country.into(),
        }
    }
}

impl Entity for Shop {
    const KIND: EntityKind = EntityKind::Shop;

    #[inline]
    fn id(&self) -> EntityId {
        self.id
    }
}
