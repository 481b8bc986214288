// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::data_file::DataFile;
use crate::registry::ImplementorRegistry;
use crate::table::ImplementorTable;

/// One trait's implementors in the merged view
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TraitImplementors {
    /// Fully qualified trait path
    pub trait_path: String,
    pub table: ImplementorTable,
}

/// Merged view over every data file in a doc tree, sorted by trait path.
///
/// This is the host-viewer side of the hand-off: the index installs its
/// register hook before any data file dispatches, so every table arrives
/// through the hook and nothing ever reaches the pending buffer's
/// last-write-wins slot.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct DocIndex {
    pub traits: Vec<TraitImplementors>,
}

impl DocIndex {
    /// Routes every data file through the registry hand-off and collects the
    /// dispatched tables into a merged index.
    pub fn collect(files: Vec<DataFile>) -> Self {
        let collected: Rc<RefCell<Vec<ImplementorTable>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&collected);
        let mut registry = ImplementorRegistry::with_hook(move |table| {
            sink.borrow_mut().push(table);
        });

        let mut paths = Vec::with_capacity(files.len());
        for file in files {
            paths.push(file.trait_path.clone());
            file.dispatch(&mut registry);
        }

        // Dispatch is synchronous, so the hook received one table per file,
        // in submit order; pair them back up with their trait paths.
        let tables = collected.take();
        let mut traits: Vec<TraitImplementors> = paths
            .into_iter()
            .zip(tables)
            .map(|(trait_path, table)| TraitImplementors { trait_path, table })
            .collect();

        traits.sort_by(|a, b| a.trait_path.cmp(&b.trait_path));
        Self { traits }
    }

    /// Looks up one trait's table by its fully qualified path
    pub fn find(&self, trait_path: &str) -> Option<&TraitImplementors> {
        self.traits.iter().find(|t| t.trait_path == trait_path)
    }

    /// Every crate appearing in any table, with its total impl count,
    /// sorted by crate name
    pub fn crate_impl_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for entry in self.traits.iter().flat_map(|t| t.table.iter()) {
            *counts.entry(entry.name.as_str()).or_default() += entry.fragments.len();
        }
        counts
    }

    /// Total impl fragments across the whole index
    pub fn impl_count(&self) -> usize {
        self.traits.iter().map(|t| t.table.fragment_count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(trait_path: &str, crates: &[(&str, usize)]) -> DataFile {
        DataFile {
            trait_path: trait_path.to_string(),
            table: ImplementorTable::from_entries(crates.iter().map(|(name, n)| {
                (
                    *name,
                    (0..*n).map(|i| format!("impl {i} for {name}")).collect(),
                )
            })),
        }
    }

    #[test]
    fn test_collect_keeps_every_file() {
        let index = DocIndex::collect(vec![
            file("core::fmt::Display", &[("regex", 2)]),
            file("core::convert::From", &[("serde_json", 3), ("regex", 1)]),
        ]);

        // Sorted by trait path, nothing lost to the single-slot buffer
        assert_eq!(index.traits.len(), 2);
        assert_eq!(index.traits[0].trait_path, "core::convert::From");
        assert_eq!(index.traits[1].trait_path, "core::fmt::Display");
        assert_eq!(index.impl_count(), 6);
    }

    #[test]
    fn test_collect_receives_tables_through_the_hook() {
        // Three files, no draining anywhere: with the hook installed before
        // the first submit, the single-slot pending buffer is never involved
        // and every table survives.
        let index = DocIndex::collect(vec![
            file("core::convert::From", &[("serde_json", 1)]),
            file("core::fmt::Display", &[("regex", 1)]),
            file("core::clone::Clone", &[("aho_corasick", 1)]),
        ]);
        assert_eq!(index.traits.len(), 3);

        // Each table ends up with its own trait, not a neighbor's
        let from = index.find("core::convert::From").expect("From should be indexed");
        assert!(from.table.get("serde_json").is_some());
        let display = index.find("core::fmt::Display").expect("Display should be indexed");
        assert!(display.table.get("regex").is_some());
        let clone = index.find("core::clone::Clone").expect("Clone should be indexed");
        assert!(clone.table.get("aho_corasick").is_some());
    }

    #[test]
    fn test_find_by_trait_path() {
        let index = DocIndex::collect(vec![file("core::convert::From", &[("regex", 1)])]);
        assert!(index.find("core::convert::From").is_some());
        assert!(index.find("core::fmt::Display").is_none());
    }

    #[test]
    fn test_crate_impl_counts_span_traits() {
        let index = DocIndex::collect(vec![
            file("core::convert::From", &[("serde_json", 3), ("regex", 1)]),
            file("core::fmt::Display", &[("regex", 2)]),
        ]);

        let counts = index.crate_impl_counts();
        assert_eq!(counts.get("regex"), Some(&3));
        assert_eq!(counts.get("serde_json"), Some(&3));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_collect_empty_input() {
        let index = DocIndex::collect(Vec::new());
        assert!(index.is_empty());
        assert_eq!(index.impl_count(), 0);
    }

    #[test]
    fn test_index_serialization_roundtrip() {
        let index = DocIndex::collect(vec![file("core::convert::From", &[("regex", 2)])]);

        let json = serde_json::to_string_pretty(&index).expect("Serialization failed");
        let deserialized: DocIndex = serde_json::from_str(&json).expect("Deserialization failed");
        assert_eq!(deserialized, index);
    }
}
