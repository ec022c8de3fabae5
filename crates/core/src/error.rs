//! Error types for the Agora table store.

use crate::id::EntityId;
use crate::kind::EntityKind;
use alloc::string::String;
use core::fmt;

/// Result type alias for Agora operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for store and analytics operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The table was already created.
    TableAlreadyExists {
        kind: EntityKind,
    },
    /// The table has not been created or loaded.
    TableNotFound {
        kind: EntityKind,
    },
    /// A kind selector outside the four known kinds.
    UnknownEntityKind {
        name: String,
    },
    /// Reading or writing a table file failed.
    IoFailure {
        path: String,
        message: String,
    },
    /// A table file could not be decoded (or encoded) as JSON.
    MalformedData {
        kind: EntityKind,
        message: String,
    },
    /// A sale references a row missing from the target table.
    ReferentialGap {
        sale: EntityId,
        target: EntityKind,
        id: EntityId,
    },
    /// A slot held a table of another kind.
    SlotMismatch {
        expected: EntityKind,
        found: EntityKind,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TableAlreadyExists { kind } => {
                write!(f, "Table already exists: {}", kind)
            }
            Error::TableNotFound { kind } => {
                write!(f, "Table not found: {}", kind)
            }
            Error::UnknownEntityKind { name } => {
                write!(f, "Unknown entity kind: {}", name)
            }
            Error::IoFailure { path, message } => {
                write!(f, "I/O failure on {}: {}", path, message)
            }
            Error::MalformedData { kind, message } => {
                write!(f, "Malformed {} data: {}", kind, message)
            }
            Error::ReferentialGap { sale, target, id } => {
                write!(f, "Sale {} references missing {} {}", sale, target, id)
            }
            Error::SlotMismatch { expected, found } => {
                write!(f, "Slot mismatch: expected {} table, found {}", expected, found)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Error {
    /// Creates a table already exists error.
    pub fn table_already_exists(kind: EntityKind) -> Self {
        Error::TableAlreadyExists { kind }
    }

    /// Creates a table not found error.
    pub fn table_not_found(kind: EntityKind) -> Self {
        Error::TableNotFound { kind }
    }

    /// Creates an unknown entity kind error.
    pub fn unknown_entity_kind(name: impl Into<String>) -> Self {
        Error::UnknownEntityKind { name: name.into() }
    }

    /// Creates an I/O failure error.
    pub fn io_failure(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::IoFailure {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a malformed data error.
    pub fn malformed_data(kind: EntityKind, message: impl Into<String>) -> Self {
        Error::MalformedData {
            kind,
            message: message.into(),
        }
    }

    /// Creates a referential gap error.
    pub fn referential_gap(sale: EntityId, target: EntityKind, id: EntityId) -> Self {
        Error::ReferentialGap { sale, target, id }
    }

    /// Creates a slot mismatch error.
    pub fn slot_mismatch(expected: EntityKind, found: EntityKind) -> Self {
        Error::SlotMismatch { expected, found }
    }
}
