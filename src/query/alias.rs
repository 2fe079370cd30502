//! Logical-to-indexed field name table.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Maps logical field names to indexed field names.
///
/// Entries keep their insertion order. Inserting a logical name twice
/// replaces its indexed name but keeps the original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    entries: IndexMap<String, String>,
}

impl AliasTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a mapping.
    pub fn insert<L: Into<String>, I: Into<String>>(&mut self, logical: L, indexed: I) {
        self.entries.insert(logical.into(), indexed.into());
    }

    /// Resolve a logical name to its indexed name.
    pub fn resolve(&self, logical: &str) -> Option<&str> {
        self.entries.get(logical).map(String::as_str)
    }

    /// Iterate over `(logical, indexed)` pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(logical, indexed)| (logical.as_str(), indexed.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<L: Into<String>, I: Into<String>> FromIterator<(L, I)> for AliasTable {
    fn from_iter<T: IntoIterator<Item = (L, I)>>(iter: T) -> Self {
        AliasTable {
            entries: iter
                .into_iter()
                .map(|(logical, indexed)| (logical.into(), indexed.into()))
                .collect(),
        }
    }
}
