// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

//! Core types for implview.
//!
//! rustdoc documents every trait with a generated data file
//! (`implementors/<module...>/trait.<Name>.js`) holding a table of
//! crate-name to rendered-impl-fragment mappings, plus a small stub that
//! hands the table to the page's viewer - calling a `register_implementors`
//! hook if one is installed, stashing the table in a `pending_implementors`
//! slot otherwise.
//!
//! This crate is the Rust-native rendition of the consuming side of that
//! convention:
//!
//! - [`table`]: the [`ImplementorTable`](table::ImplementorTable) data model
//! - [`registry`]: the hook / pending-buffer hand-off as an explicit object
//! - [`data_file`]: codec for the generated `trait.*.js` wire shape
//! - [`doc_tree`]: discovery of data files under a rustdoc output directory
//! - [`index`]: the merged, serializable view a host builds from the tables

pub mod data_file;
pub mod doc_tree;
pub mod index;
pub mod registry;
pub mod table;

pub use data_file::DataFile;
pub use doc_tree::DocTree;
pub use index::{DocIndex, TraitImplementors};
pub use registry::{ImplementorRegistry, RegisterHook};
pub use table::{CrateImplementors, ImplementorTable};
