//! Per-kind id counters.
//!
//! Every entity kind owns an independent process-wide counter. Records built
//! through their `new` constructor draw the next id from it; records rebuilt
//! from storage carry their own id and leave the counter alone unless the
//! store bumps it explicitly after a load.

use crate::kind::{EntityKind, SLOT_COUNT};
use core::sync::atomic::{AtomicU32, Ordering};

/// Identifier of an entity, unique within its table.
pub type EntityId = u32;

/// Next id to hand out, indexed by slot. Ids start at 1.
static NEXT_IDS: [AtomicU32; SLOT_COUNT] = [
    AtomicU32::new(1),
    AtomicU32::new(1),
    AtomicU32::new(1),
    AtomicU32::new(1),
];

/// Takes the next unique id for the given kind.
pub fn next_id(kind: EntityKind) -> EntityId {
    NEXT_IDS[kind.slot()].fetch_add(1, Ordering::SeqCst)
}

/// Ensures future ids of this kind are strictly greater than `id`.
pub fn set_next_id_if_greater(kind: EntityKind, id: EntityId) {
    NEXT_IDS[kind.slot()].fetch_max(id.saturating_add(1), Ordering::SeqCst);
}
