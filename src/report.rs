// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use ansi_term::Colour::{Blue, Green};
use ansi_term::Style;
use anyhow::{Context, Result};
use ron::ser::{PrettyConfig, to_writer_pretty};
use std::fs::File;

use crate::cli::ExportFormat;
use implview_core::doc_tree::strip_markup;
use implview_core::{DocIndex, TraitImplementors};

/// One line per trait: path plus implementor counts
pub fn print_traits(index: &DocIndex) {
    for t in &index.traits {
        println!(
            "{} [{}]",
            Blue.paint(&t.trait_path),
            Green.paint(format!(
                "{} crates, {} impls",
                t.table.len(),
                t.table.fragment_count()
            ))
        );
    }
}

/// Every crate appearing in any table, sorted, with impl counts
pub fn print_crates(index: &DocIndex) {
    for (name, count) in index.crate_impl_counts() {
        println!(
            "{} [{}]",
            Blue.paint(name),
            Green.paint(format!("{count} impls"))
        );
    }
}

/// The impls themselves, grouped by trait and crate; `trait_filter`
/// restricts output to a single trait
pub fn print_impls(index: &DocIndex, trait_filter: Option<&str>) -> Result<()> {
    let traits: Vec<&TraitImplementors> = match trait_filter {
        Some(path) => vec![
            index
                .find(path)
                .context(format!("Trait not found in documentation: {path}"))?,
        ],
        None => index.traits.iter().collect(),
    };

    for t in traits {
        println!("{}", Style::new().bold().paint(&t.trait_path));
        for entry in t.table.iter() {
            println!("  {}", Green.paint(&entry.name));
            for fragment in &entry.fragments {
                println!("    {}", strip_markup(fragment));
            }
        }
        println!();
    }
    Ok(())
}

/// Writes the merged index to a file in the requested format
pub fn export(index: &DocIndex, format: ExportFormat, out_path: Option<&str>) -> Result<()> {
    let path = out_path.unwrap_or_else(|| format.default_out_path());

    let file =
        File::create(path).context(format!("Failed to open file for writing: {path}"))?;
    match format {
        ExportFormat::Json => serde_json::to_writer_pretty(file, index)
            .context(format!("Failed to serialize index to: {path}"))?,
        ExportFormat::Ron => to_writer_pretty(file, index, PrettyConfig::default())
            .context(format!("Failed to serialize index to: {path}"))?,
    }

    println!(
        "Wrote {} [{}]",
        Blue.paint(path),
        Green.paint(format!(
            "{} traits, {} impls",
            index.traits.len(),
            index.impl_count()
        ))
    );
    Ok(())
}
