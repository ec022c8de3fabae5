//! The table store.
//!
//! This module provides the `TableStore` struct which owns one slot per entity
//! kind. A slot is either absent or holds a created table; absent and
//! created-but-empty are distinct states.
//!
//! The store is not synchronized. Callers sharing it across threads must
//! serialize access themselves.

use crate::codec::{decode_table, encode_table};
use crate::config::StoreConfig;
use crate::table::{AnyTable, TableEntity};
use agora_core::{set_next_id_if_greater, EntityKind, Error, Result, SLOT_COUNT};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Resolves an entity kind to its fixed slot index.
#[inline]
pub fn resolve_slot(kind: EntityKind) -> usize {
    kind.slot()
}

/// In-memory store of the four entity tables.
#[derive(Clone, Debug, Default)]
pub struct TableStore {
    /// Slot index → table, `None` while absent.
    slots: [Option<AnyTable>; SLOT_COUNT],
    config: StoreConfig,
}

impl TableStore {
    /// Creates a store with every slot absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with the given persistence options.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            slots: Default::default(),
            config,
        }
    }

    /// Creates the empty table for `T`.
    pub fn create_table<T: TableEntity>(&mut self) -> Result<()> {
        self.create_table_kind(T::KIND)
    }

    /// Creates the empty table for `kind`.
    pub fn create_table_kind(&mut self, kind: EntityKind) -> Result<()> {
        let slot = &mut self.slots[resolve_slot(kind)];
        if slot.is_some() {
            return Err(Error::table_already_exists(kind));
        }
        *slot = Some(AnyTable::empty(kind));
        debug!(%kind, "created table");
        Ok(())
    }

    /// Returns true if the slot for `kind` holds a table.
    pub fn is_created(&self, kind: EntityKind) -> bool {
        self.slots[resolve_slot(kind)].is_some()
    }

    /// Returns the kinds whose table exists, in slot order.
    pub fn created_kinds(&self) -> Vec<EntityKind> {
        EntityKind::ALL
            .into_iter()
            .filter(|&kind| self.is_created(kind))
            .collect()
    }

    /// Returns the table for `kind` as a tagged view.
    pub fn table(&self, kind: EntityKind) -> Result<&AnyTable> {
        self.slots[resolve_slot(kind)]
            .as_ref()
            .ok_or_else(|| Error::table_not_found(kind))
    }

    /// Returns the number of rows in the table for `kind`.
    pub fn row_count(&self, kind: EntityKind) -> Result<usize> {
        self.table(kind).map(AnyTable::len)
    }

    /// Returns the rows of `T`'s table in insertion order.
    pub fn get_table<T: TableEntity>(&self) -> Result<&[T]> {
        let table = self.table(T::KIND)?;
        T::rows(table)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::slot_mismatch(T::KIND, table.kind()))
    }

    /// Appends one row to `T`'s table.
    pub fn insert<T: TableEntity>(&mut self, entity: T) -> Result<()> {
        self.insert_with(|| entity)
    }

    /// Appends the row built by `make` to `T`'s table.
    ///
    /// `make` is only called once the table is known to exist.
    pub fn insert_with<T, F>(&mut self, make: F) -> Result<()>
    where
        T: TableEntity,
        F: FnOnce() -> T,
    {
        let kind = T::KIND;
        let table = self.slots[resolve_slot(kind)]
            .as_mut()
            .ok_or_else(|| Error::table_not_found(kind))?;
        let found = table.kind();
        let rows = T::rows_mut(table).ok_or_else(|| Error::slot_mismatch(kind, found))?;
        let entity = make();
        debug!(%kind, id = entity.id(), "inserted row");
        rows.push(entity);
        Ok(())
    }

    /// Replaces `T`'s table with the rows stored at `path`.
    ///
    /// Returns the number of rows loaded.
    pub fn load<T: TableEntity>(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        self.load_kind(T::KIND, path)
    }

    /// Replaces the table for `kind` with the rows stored at `path`.
    ///
    /// The previous slot state is irrelevant; on failure it is left untouched.
    pub fn load_kind(&mut self, kind: EntityKind, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .map_err(|e| Error::io_failure(path.display().to_string(), e.to_string()))?;
        let table = decode_table(kind, &bytes)?;

        if let Some(max) = table.max_id() {
            set_next_id_if_greater(kind, max);
        }

        let rows = table.len();
        self.slots[resolve_slot(kind)] = Some(table);
        info!(%kind, path = %path.display(), rows, "loaded table");
        Ok(rows)
    }

    /// Writes `T`'s table to `path`, replacing any existing file.
    pub fn save<T: TableEntity>(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save_kind(T::KIND, path)
    }

    /// Writes the table for `kind` to `path`, replacing any existing file.
    pub fn save_kind(&self, kind: EntityKind, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let table = self.table(kind)?;
        let bytes = encode_table(table, self.config.pretty)?;
        fs::write(path, bytes)
            .map_err(|e| Error::io_failure(path.display().to_string(), e.to_string()))?;
        info!(%kind, path = %path.display(), rows = table.len(), "saved table");
        Ok(())
    }

    /// Loads every table whose file exists under `dir`.
    ///
    /// Missing files leave their slot as it was. Returns the kinds loaded.
    pub fn load_all(&mut self, dir: impl AsRef<Path>) -> Result<Vec<EntityKind>> {
        let dir = dir.as_ref();
        let mut loaded = Vec::new();
        for kind in EntityKind::ALL {
            let path = dir.join(kind.file_name());
            if !path.is_file() {
                debug!(%kind, path = %path.display(), "no table file, skipping");
                continue;
            }
            self.load_kind(kind, &path)?;
            loaded.push(kind);
        }
        Ok(loaded)
    }

    /// Saves every created table into `dir`. Returns the kinds saved.
    pub fn save_all(&self, dir: impl AsRef<Path>) -> Result<Vec<EntityKind>> {
        let dir = dir.as_ref();
        let kinds = self.created_kinds();
        for &kind in &kinds {
            self.save_kind(kind, dir.join(kind.file_name()))?;
        }
        Ok(kinds)
    }
}
