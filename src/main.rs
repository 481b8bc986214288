//!
//! implview
//!
//! rustdoc drops a generated data file next to every documented trait
//! (`implementors/<module...>/trait.<Name>.js`): a table mapping crate names
//! to pre-rendered impl fragments, wrapped in a stub that hands the table to
//! the page's viewer through a register hook or a pending buffer. The
//! browser viewer merges those tables into the "Implementors" section of a
//! trait page.
//!
//! implview is that viewer for the terminal. It scans a `target/doc` tree,
//! routes every data file's table through the same register/pending hand-off
//! (see `implview_core::registry`), and reports on what it finds: which
//! traits are documented, which crates implement them, and the impls
//! themselves with the link markup stripped. The merged index can also be
//! exported as JSON or RON for other tooling.
//!

mod cli;
mod report;

use cli::{ImplArgs, ImplCommand};
use implview_core::{DocIndex, DocTree};

use ansi_term::Colour::{Cyan, Green, Red, Yellow};
use ansi_term::Style;
use std::env;
use std::process::exit;

fn show_ascii_lens() {
    println!(
        "{}",
        Cyan.paint(
            r#"
   o  _ __ ___  _ __ | |
   | | '_ ` _ \| '_ \| |
   | | | | | | | |_) | |
   |_|_| |_| |_| .__/|_|
               |_|  view
"#
        )
    );
}

fn show_help() {
    show_ascii_lens();
    println!("{}", help_message());
}

fn help_message() -> String {
    format!(
        "Usage: implview [COMMAND] [OPTIONS]\n\
         \n\
         Commands:\n\
         \x20 print-traits   List every documented trait with implementor counts (default)\n\
         \x20 print-crates   List every crate appearing in the implementor data\n\
         \x20 print-impls    Print the impls themselves, grouped by trait and crate\n\
         \x20 export         Write the merged index to a file\n\
         \n\
         Options:\n\
         \x20 --doc-dir <path>     rustdoc output directory (default: target/doc)\n\
         \x20 --trait <path>       restrict print-impls to one trait, e.g. {}\n\
         \x20 --format <json|ron>  export format (default: json)\n\
         \x20 --out <path>         export destination (default: implementors.<format>)\n\
         \x20 -h, --help           show this help\n\
         \x20 -V, --version        show version",
        Green.paint("core::convert::From")
    )
}

fn show_version() {
    println!(
        "{} {}",
        Style::new().bold().paint("implview version"),
        Green.paint(env!("CARGO_PKG_VERSION"))
    );
}

pub fn main() {
    // Handle help and version flags
    if env::args().any(|a| a == "--help" || a == "-h") {
        show_help();
        return;
    }

    if env::args().any(|a| a == "--version" || a == "-V") {
        show_version();
        return;
    }

    let args = ImplArgs::parse(env::args());

    let tree = match DocTree::open(&args.doc_dir) {
        Ok(tree) => tree,
        Err(_) => {
            show_ascii_lens();
            println!(
                "{}",
                Red.bold()
                    .paint(format!("No rustdoc output found at {}", args.doc_dir))
            );
            println!(
                "{}",
                Yellow.paint("implview reads the implementor data files rustdoc generates.")
            );
            println!("\nTo use implview:");
            println!("  1. Run {} in your project", Green.paint("cargo doc"));
            println!("  2. Run {} from the project root,", Green.paint("implview"));
            println!(
                "     or point it elsewhere with {}",
                Green.paint("implview --doc-dir <path>")
            );
            exit(1);
        }
    };

    if let Err(e) = run(&args, &tree) {
        eprintln!("Error: {e:#}");
        exit(1);
    }
}

fn run(args: &ImplArgs, tree: &DocTree) -> anyhow::Result<()> {
    let files = tree.data_files()?;
    let index = DocIndex::collect(files);

    match args.command {
        ImplCommand::PrintTraits => report::print_traits(&index),
        ImplCommand::PrintCrates => report::print_crates(&index),
        ImplCommand::PrintImpls => report::print_impls(&index, args.trait_filter.as_deref())?,
        ImplCommand::Export => report::export(&index, args.format, args.out_path.as_deref())?,
    }

    Ok(())
}
