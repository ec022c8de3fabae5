//! JSON encoding of whole tables.
//!
//! A table file is a JSON array with one object per row; field names are the
//! camelCase names declared on the entity records.

use crate::table::{AnyTable, TableEntity};
use agora_core::{Buyer, EntityKind, Error, Good, Result, Sale, Shop};

/// Decodes a JSON array of `kind` rows.
pub fn decode_table(kind: EntityKind, bytes: &[u8]) -> Result<AnyTable> {
    match kind {
        EntityKind::Buyer => decode_rows::<Buyer>(bytes),
        EntityKind::Good => decode_rows::<Good>(bytes),
        EntityKind::Sale => decode_rows::<Sale>(bytes),
        EntityKind::Shop => decode_rows::<Shop>(bytes),
    }
}

fn decode_rows<T: TableEntity>(bytes: &[u8]) -> Result<AnyTable> {
    serde_json::from_slice::<Vec<T>>(bytes)
        .map(T::wrap)
        .map_err(|e| Error::malformed_data(T::KIND, e.to_string()))
}

/// Encodes every row of `table` as a JSON array.
pub fn encode_table(table: &AnyTable, pretty: bool) -> Result<Vec<u8>> {
    let encoded = match table {
        AnyTable::Buyers(rows) => encode_rows(rows, pretty),
        AnyTable::Goods(rows) => encode_rows(rows, pretty),
        AnyTable::Sales(rows) => encode_rows(rows, pretty),
        AnyTable::Shops(rows) => encode_rows(rows, pretty),
    };
    encoded.map_err(|e| Error::malformed_data(table.kind(), e.to_string()))
}

fn encode_rows<T: TableEntity>(rows: &[T], pretty: bool) -> serde_json::Result<Vec<u8>> {
    if pretty {
        serde_json::to_vec_pretty(rows)
    } else {
        serde_json::to_vec(rows)
    }
}
