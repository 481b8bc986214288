// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use serde::{Deserialize, Serialize};

/// One crate's slice of an implementor table: the crate name plus the
/// rendered impl fragments rustdoc emitted for it, in authored order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CrateImplementors {
    /// Crate name as it appears in the data file
    pub name: String,
    /// Pre-rendered markup fragments, one per impl
    pub fragments: Vec<String>,
}

// Allow comparisons with plain strings when scanning entry lists
impl PartialEq<str> for CrateImplementors {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

/// Ordered mapping from crate name to that crate's impl fragments, as found
/// in one generated `trait.*.js` data file.
///
/// Keys are unique within a file. Order is "as authored" - it matters for
/// display and is preserved through parsing and serialization, but carries
/// no further meaning. A table is built once and never mutated afterwards.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct ImplementorTable {
    entries: Vec<CrateImplementors>,
}

impl ImplementorTable {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from `(crate name, fragments)` pairs, keeping the
    /// order the pairs arrive in. A repeated crate name replaces the
    /// earlier entry; generated files never repeat a key, so this only
    /// matters for hand-built tables.
    pub fn from_entries<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<String>)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (name, fragments) in pairs {
            table.insert(name.into(), fragments);
        }
        table
    }

    fn insert(&mut self, name: String, fragments: Vec<String>) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.name == name) {
            existing.fragments = fragments;
        } else {
            self.entries.push(CrateImplementors { name, fragments });
        }
    }

    /// Looks up the fragments recorded for a crate
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.fragments.as_slice())
    }

    /// Crate names in authored order
    pub fn crate_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Entries in authored order
    pub fn iter(&self) -> std::slice::Iter<'_, CrateImplementors> {
        self.entries.iter()
    }

    /// Number of crates in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total impl fragments across all crates
    pub fn fragment_count(&self) -> usize {
        self.entries.iter().map(|e| e.fragments.len()).sum()
    }
}

impl<'a> IntoIterator for &'a ImplementorTable {
    type Item = &'a CrateImplementors;
    type IntoIter = std::slice::Iter<'a, CrateImplementors>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
