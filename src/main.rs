use std::path::{Path, PathBuf};

use bom_sync::sync::{self, SyncOptions};
use bom_sync::{BomError, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging()?;
    match cli.command {
        Command::Sync(args) => execute_sync(args),
    }
}

fn execute_sync(args: SyncArgs) -> Result<()> {
    if !args.netlist.exists() {
        return Err(BomError::MissingInput(args.netlist));
    }

    let csv_path = with_appended_extension(&args.output, ".csv");
    let xlsx_path = with_appended_extension(&args.output, ".xlsx");
    let options = SyncOptions {
        translate: !args.raw_footprints,
    };

    sync::run(&args.netlist, &xlsx_path, &csv_path, options)?;
    Ok(())
}

/// Appends an extension to the output base, matching the KiCad BOM plugin
/// calling convention where `%O` is a bare base path.
fn with_appended_extension(base: &Path, extension: &str) -> PathBuf {
    let mut path = base.as_os_str().to_os_string();
    path.push(extension);
    PathBuf::from(path)
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|error| BomError::Logging(error.to_string()))
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Generate or update an XLSX bill-of-materials from a KiCad netlist."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reconcile a netlist against the BOM workbook and CSV export.
    Sync(SyncArgs),
}

#[derive(clap::Args)]
struct SyncArgs {
    /// KiCad generic netlist (XML) to read.
    netlist: PathBuf,

    /// Output base path; `<base>.csv` and `<base>.xlsx` are written.
    output: PathBuf,

    /// Match footprints by raw string equality instead of their translated
    /// human-readable form.
    #[arg(long)]
    raw_footprints: bool,
}
