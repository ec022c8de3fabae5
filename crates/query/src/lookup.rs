//! Id lookups used to join sales against the other tables.

use agora_core::{Entity, EntityId};
use hashbrown::HashMap;

/// Id → rows index over one table snapshot.
///
/// Ids are expected to be unique but are not guaranteed to be; every row
/// sharing an id is kept, in table order.
pub(crate) struct IdLookup<'a, T> {
    by_id: HashMap<EntityId, Vec<&'a T>>,
}

impl<'a, T: Entity> IdLookup<'a, T> {
    pub(crate) fn new(rows: &'a [T]) -> Self {
        let mut by_id: HashMap<EntityId, Vec<&'a T>> = HashMap::with_capacity(rows.len());
        for row in rows {
            by_id.entry(row.id()).or_default().push(row);
        }
        Self { by_id }
    }

    /// First row with this id in table order.
    pub(crate) fn first(&self, id: EntityId) -> Option<&'a T> {
        self.by_id.get(&id).and_then(|rows| rows.first().copied())
    }

    /// Every row with this id in table order.
    pub(crate) fn all(&self, id: EntityId) -> &[&'a T] {
        self.by_id.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}
