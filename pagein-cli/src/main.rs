use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use pagein_core::{MachBinary, ObjcClass, SymbolOrder, NON_LAZY_CLASS_LIST};
use serde::Serialize;

/// Launch-time tooling for iOS binaries
#[derive(Parser)]
#[command(
    name = "pagein",
    about = "Inspect Mach-O binaries for +load classes and generate linker order files",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List Objective-C classes that may implement +load
    Classes {
        /// Path to the Mach-O executable
        path: PathBuf,

        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List all sections
    Sections {
        /// Path to the Mach-O executable
        path: PathBuf,
    },
    /// Generate a linker order file from a raw symbol log
    Order {
        /// Path to the raw symbol log written by the launch instrumentation
        raw: PathBuf,

        /// Destination path for the generated order file
        #[arg(short, long, default_value = "app.order")]
        output: PathBuf,
    },
}

#[derive(Serialize)]
struct ClassReport<'a> {
    binary: &'a str,
    section_present: bool,
    classes: Vec<ClassEntry<'a>>,
}

#[derive(Serialize)]
struct ClassEntry<'a> {
    name: &'a str,
    address: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Classes { path, json } => {
            let bin = MachBinary::open(&path)?;
            let classes = bin.load_method_candidates();

            if json {
                print_class_json(&bin, classes)?;
            } else if classes.is_empty() {
                println!("No Objective-C classes flagged for load-time initialization.");
            } else {
                println!(
                    "{}",
                    "Objective-C classes that may implement +load:".bold()
                );
                for class in classes {
                    println!("- {}", class.name);
                }
                println!("{} candidate classes listed.", classes.len());
            }
        }

        Command::Sections { path } => {
            let bin = MachBinary::open(&path)?;
            if bin.sections.is_empty() {
                println!("No sections found.");
            } else {
                println!(
                    "{:<20} {:<12} {:<18} {:<10} {:<10} {:<10}",
                    "Section", "Segment", "VMA", "Size", "Offset", "Flags"
                );
                println!("{}", "-".repeat(84));
                for s in &bin.sections {
                    println!(
                        "{:<20} {:<12} 0x{:<16x} {:<10x} {:<10x} {:<10x}",
                        s.name, s.segment, s.vma, s.size, s.file_offset, s.flags
                    );
                }
            }
        }

        Command::Order { raw, output } => {
            println!("Reading raw symbol log: {}", raw.display());
            let order = SymbolOrder::from_path(&raw)?;
            println!("Collected {} unique symbols.", order.len());

            println!("Writing order file: {}", output.display());
            order.write_to(&output)?;
            println!("{}", "Order file generated.".green());
        }
    }

    Ok(())
}

fn print_class_json(bin: &MachBinary, classes: &[ObjcClass]) -> Result<()> {
    let report = ClassReport {
        binary: &bin.path,
        section_present: bin.section(NON_LAZY_CLASS_LIST).is_some(),
        classes: classes
            .iter()
            .map(|class| ClassEntry {
                name: &class.name,
                address: class.address,
            })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
