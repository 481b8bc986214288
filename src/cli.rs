// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

// implview commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImplCommand {
    PrintTraits,
    PrintCrates,
    PrintImpls,
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Ron,
}

impl ExportFormat {
    pub fn default_out_path(self) -> &'static str {
        match self {
            ExportFormat::Json => "implementors.json",
            ExportFormat::Ron => "implementors.ron",
        }
    }
}

#[derive(Debug)]
pub struct ImplArgs {
    pub command: ImplCommand,
    pub doc_dir: String,
    pub trait_filter: Option<String>,
    pub format: ExportFormat,
    pub out_path: Option<String>,
}

impl ImplArgs {
    pub fn parse<I>(args: I) -> Self
    where
        I: Iterator<Item = String>,
    {
        let mut command = ImplCommand::PrintTraits; // Default command
        let mut doc_dir = "target/doc".to_string();
        let mut trait_filter = None;
        let mut format = ExportFormat::Json;
        let mut out_path = None;

        // Convert args to a vector for easier processing
        let args: Vec<String> = args.collect();

        // Skip the program name
        let mut start_idx = 1;

        // Check if the first real arg is a command
        if args.len() > start_idx {
            match args[start_idx].as_str() {
                "print-traits" => {
                    command = ImplCommand::PrintTraits;
                    start_idx += 1;
                }
                "print-crates" => {
                    command = ImplCommand::PrintCrates;
                    start_idx += 1;
                }
                "print-impls" => {
                    command = ImplCommand::PrintImpls;
                    start_idx += 1;
                }
                "export" => {
                    command = ImplCommand::Export;
                    start_idx += 1;
                }
                _ => { /* Not a command, use default and keep this arg */ }
            }
        }

        let mut i = start_idx;
        while i < args.len() {
            match args[i].as_str() {
                "--doc-dir" => {
                    if i + 1 < args.len() {
                        doc_dir = args[i + 1].clone();
                        i += 2;
                    } else {
                        eprintln!("Warning: --doc-dir flag requires a path argument");
                        i += 1;
                    }
                }
                "--trait" => {
                    if i + 1 < args.len() {
                        trait_filter = Some(args[i + 1].clone());
                        i += 2;
                    } else {
                        eprintln!("Warning: --trait flag requires a trait path argument");
                        i += 1;
                    }
                }
                "--format" => {
                    if i + 1 < args.len() {
                        match args[i + 1].as_str() {
                            "json" => format = ExportFormat::Json,
                            "ron" => format = ExportFormat::Ron,
                            other => {
                                eprintln!("Warning: unknown export format '{other}', using json");
                            }
                        }
                        i += 2;
                    } else {
                        eprintln!("Warning: --format flag requires json or ron");
                        i += 1;
                    }
                }
                "--out" => {
                    if i + 1 < args.len() {
                        out_path = Some(args[i + 1].clone());
                        i += 2;
                    } else {
                        eprintln!("Warning: --out flag requires a path argument");
                        i += 1;
                    }
                }
                other => {
                    eprintln!("Warning: ignoring unrecognized argument '{other}'");
                    i += 1;
                }
            }
        }

        Self {
            command,
            doc_dir,
            trait_filter,
            format,
            out_path,
        }
    }
}
