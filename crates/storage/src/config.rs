//! Persistence options.

use serde::Deserialize;

/// Options applied when tables are written to disk.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Pretty-print JSON dumps instead of writing one compact line.
    pub pretty: bool,
}

impl StoreConfig {
    /// Returns a config that pretty-prints dumps.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}
