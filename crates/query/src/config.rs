//! Analytics options.

use serde::Deserialize;

/// What a query does when a sale references a row that does not exist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapPolicy {
    /// Leave the sale out of the computation.
    #[default]
    Skip,
    /// Abort the query with `Error::ReferentialGap`.
    Fail,
}

/// Options shared by every query of an engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Applied uniformly by every query that joins sales to other tables.
    pub missing_reference: GapPolicy,
}

impl AnalyticsConfig {
    /// Returns a config that fails on the first unresolved reference.
    pub fn strict() -> Self {
        Self {
            missing_reference: GapPolicy::Fail,
        }
    }
}
