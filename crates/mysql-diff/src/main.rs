//! mysql-diff CLI
//!
//! Compares the `CREATE TABLE` statements of two MySQL dumps and reports the
//! structural differences per table.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

use mysql_diff_core::{
    DiffOptions, ErrorPolicy, SchemaDiff, TableDefinition, TableDiff, diff_schemas,
    parse_dump_with,
};

/// Report format written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// The full change-set as pretty-printed JSON.
    Json,
    /// One line per table.
    Summary,
}

/// Compare the table definitions of two MySQL dumps.
#[derive(Parser)]
#[command(name = "mysql-diff")]
#[command(author, version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Dump with the old schema.
    old: PathBuf,

    /// Dump with the new schema.
    new: PathBuf,

    /// Only compare the table with this name.
    #[arg(short, long)]
    table: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, env = "MYSQL_DIFF_FORMAT", default_value_t = Format::Summary)]
    format: Format,

    /// Fail on the first CREATE TABLE statement that does not parse.
    #[arg(long)]
    strict: bool,

    /// Report renamed indexes, foreign keys and checks as a removal plus an addition.
    #[arg(long)]
    no_rename_detection: bool,

    /// Include unchanged tables in the report.
    #[arg(short, long)]
    all: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let policy = if cli.strict {
        ErrorPolicy::Abort
    } else {
        ErrorPolicy::Skip
    };
    let mut old = load_dump(&cli.old, policy)?;
    let mut new = load_dump(&cli.new, policy)?;
    if let Some(name) = &cli.table {
        old.retain(|t| t.name == *name);
        new.retain(|t| t.name == *name);
        if old.is_empty() && new.is_empty() {
            anyhow::bail!("table `{name}` not found in either dump");
        }
    }

    let options = DiffOptions {
        detect_renames: !cli.no_rename_detection,
    };
    let mut diff = diff_schemas(&old, &new, options);
    let total = diff.tables.len();
    if !cli.all {
        diff.tables.retain(TableDiff::has_changes);
    }
    info!(tables = total, changed = diff.changed().count(), "compared dumps");

    match cli.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
        Format::Summary => print_summary(&diff),
    }
    Ok(())
}

/// Reads a dump file and parses its tables under `policy`.
fn load_dump(path: &Path, policy: ErrorPolicy) -> anyhow::Result<Vec<TableDefinition>> {
    let sql = fs::read_to_string(path)
        .with_context(|| format!("failed to read dump {}", path.display()))?;
    let tables = parse_dump_with(&sql, policy)
        .with_context(|| format!("failed to parse dump {}", path.display()))?;
    debug!(path = %path.display(), tables = tables.len(), "loaded dump");
    Ok(tables)
}

fn print_summary(diff: &SchemaDiff) {
    if diff.tables.is_empty() {
        println!("No differences.");
        return;
    }
    for table in &diff.tables {
        println!("Table {}: {}", table.name, table.summary());
    }
}
