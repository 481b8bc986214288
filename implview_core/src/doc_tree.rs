// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use crate::data_file::{self, DataFile};

/// Subdirectory of a rustdoc output root holding the per-trait data files
pub const IMPLEMENTORS_DIR: &str = "implementors";
/// Data files are named `trait.<Name>.js`
pub const DATA_FILE_PREFIX: &str = "trait.";
pub const DATA_FILE_SUFFIX: &str = ".js";

/// A rustdoc output directory (typically `target/doc`) with an
/// `implementors/` tree underneath it.
#[derive(Debug, Clone)]
pub struct DocTree {
    root: PathBuf,
}

impl DocTree {
    /// Opens a rustdoc output directory, checking that it and its
    /// `implementors/` subdirectory actually exist.
    pub fn open(doc_dir: impl AsRef<Path>) -> Result<Self> {
        let root = doc_dir.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(anyhow::anyhow!(
                "Documentation directory not found: {}",
                root.display()
            ));
        }
        let implementors = root.join(IMPLEMENTORS_DIR);
        if !implementors.is_dir() {
            return Err(anyhow::anyhow!(
                "No implementors directory under: {}",
                root.display()
            ));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Discovers and parses every data file under `implementors/`.
    ///
    /// The trait path for each file is derived from its location: the
    /// directory components under `implementors/` plus the file-name stem,
    /// so `implementors/core/convert/trait.From.js` becomes
    /// `core::convert::From`. Results are sorted by trait path for
    /// deterministic output; finding no data files at all is an error.
    pub fn data_files(&self) -> Result<Vec<DataFile>> {
        let mut files = Vec::new();
        let mut modules = Vec::new();
        collect_data_files(&self.root.join(IMPLEMENTORS_DIR), &mut modules, &mut files)?;

        if files.is_empty() {
            return Err(anyhow::anyhow!(
                "No implementor data files found in {}",
                self.root.join(IMPLEMENTORS_DIR).display()
            ));
        }

        files.sort_by(|a, b| a.trait_path.cmp(&b.trait_path));
        Ok(files)
    }
}

/// Reduces a rendered impl fragment to plain text for display: drops the
/// link markup and unescapes the small entity set rustdoc uses. The
/// fragment itself is never rewritten or regenerated.
pub fn strip_markup(fragment: &str) -> String {
    let tags = Regex::new(r"<[^>]+>").expect("Failed compiling tag pattern");
    let text = tags.replace_all(fragment, "");
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        // &amp; goes last so it cannot produce entities for the lines above
        .replace("&amp;", "&")
}

/// Derives the trait name from a data file name, e.g. `trait.From.js` -> `From`
fn trait_name(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix(DATA_FILE_PREFIX)?
        .strip_suffix(DATA_FILE_SUFFIX)
}

fn collect_data_files(
    dir: &Path,
    modules: &mut Vec<String>,
    out: &mut Vec<DataFile>,
) -> Result<()> {
    let entries =
        fs::read_dir(dir).context(format!("Failed to read directory: {}", dir.display()))?;

    for entry in entries.filter_map(Result::ok) {
        let path = entry.path();
        if path.is_dir() {
            if let Some(name) = path.file_name().and_then(|f| f.to_str()) {
                modules.push(name.to_string());
                collect_data_files(&path, modules, out)?;
                modules.pop();
            }
        } else if let Some(file_name) = path.file_name().and_then(|f| f.to_str()) {
            // Skip anything that isn't a trait.*.js data file (rustdoc keeps
            // no other files here, but don't rely on that)
            let Some(name) = trait_name(file_name) else {
                continue;
            };

            let content = fs::read_to_string(&path)
                .context(format!("Failed to read file: {}", path.display()))?;
            let table = data_file::parse(&content).context(format!(
                "Failed to parse implementor data from: {}",
                path.display()
            ))?;

            let trait_path = modules
                .iter()
                .map(String::as_str)
                .chain([name])
                .collect::<Vec<_>>()
                .join("::");

            out.push(DataFile { trait_path, table });
        }
    }

    Ok(())
}
