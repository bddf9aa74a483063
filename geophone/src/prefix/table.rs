//! Prefix → location table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::code::Prefix;

/// One (prefix, location) association, as read from the source data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixRecord {
    pub prefix: Prefix,
    pub location: String,
}

impl PrefixRecord {
    pub fn new(prefix: Prefix, location: impl Into<String>) -> Self {
        Self {
            prefix,
            location: location.into(),
        }
    }
}

/// Immutable mapping from numeric prefix to location name.
///
/// Built once and then only read. Lookups are exact-key; the longest-prefix
/// search lives in [`crate::resolver`].
///
/// When the same prefix appears more than once during construction, the
/// last occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct PrefixTable {
    entries: HashMap<Prefix, String>,
}

impl PrefixTable {
    /// Build a table from parsed records.
    pub fn from_records(records: impl IntoIterator<Item = PrefixRecord>) -> Self {
        records.into_iter().collect()
    }

    /// Location for `prefix`, if it is present as an exact key.
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.entries.get(prefix).map(String::as_str)
    }

    /// Number of distinct prefixes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all (prefix, location) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&Prefix, &str)> {
        self.entries.iter().map(|(p, l)| (p, l.as_str()))
    }
}

impl FromIterator<(Prefix, String)> for PrefixTable {
    fn from_iter<I: IntoIterator<Item = (Prefix, String)>>(iter: I) -> Self {
        // HashMap's collect keeps the last value for a repeated key
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl FromIterator<PrefixRecord> for PrefixTable {
    fn from_iter<I: IntoIterator<Item = PrefixRecord>>(iter: I) -> Self {
        iter.into_iter().map(|r| (r.prefix, r.location)).collect()
    }
}
