//! CLI argument definitions for eodpipe.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `inflate` | Decompress `*.csvz` archives into `<symbol>.csv` files |
//! | `load` | Insert every `*.csv` record file into the EOD table |
//! | `run` | `inflate` followed by `load` |
//! | `status` | Row counts per symbol and recent loads |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--db` | `$EODPIPE_DB_PATH` | DuckDB database file |
//! | `--env` | `$EODPIPE_ENV` | `production` or any other name for the test table |
//! | `--format` | `text` | Output format (text, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//!
//! # Examples
//!
//! ```bash
//! # Unpack archives from the parent directory into the current one
//! eodpipe inflate
//!
//! # Load every CSV in the current directory
//! eodpipe load
//!
//! # Both stages, loading into the test table
//! eodpipe --env development run --archive-dir ./archives --work-dir ./csv
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// End-of-day stock data pipeline.
///
/// Inflates zlib-compressed CSV archives and loads the records into a
/// DuckDB table, one transaction per file.
#[derive(Debug, Parser)]
#[command(
    name = "eodpipe",
    author,
    version,
    about = "Inflate and load end-of-day stock data"
)]
pub struct Cli {
    /// DuckDB database file (overrides EODPIPE_DB_PATH).
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Environment name; anything other than `production` targets the test table.
    #[arg(long = "env", global = true)]
    pub environment: Option<String>,

    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Progress lines and a short summary.
    Text,
    /// Single JSON object; progress lines go to stderr.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decompress every `*.csvz` archive into `<symbol>.csv`.
    ///
    /// # Examples
    ///
    ///   eodpipe inflate
    ///   eodpipe inflate --input-dir ./archives --output-dir ./csv
    Inflate(InflateArgs),

    /// Insert every `*.csv` record file into the EOD table.
    ///
    /// Each file is loaded in one transaction. Loading is append-only:
    /// running it twice over the same files stores every row twice unless
    /// --skip-loaded is given.
    Load(LoadArgs),

    /// Run `inflate` and then `load`.
    Run(RunArgs),

    /// Show row counts per symbol and the most recent loads.
    Status(StatusArgs),
}

#[derive(Debug, Args)]
pub struct InflateArgs {
    /// Directory holding the `*.csvz` archives.
    #[arg(long, default_value = "..")]
    pub input_dir: PathBuf,

    /// Directory receiving the `<symbol>.csv` files.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// Directory holding the `*.csv` record files.
    #[arg(long, default_value = ".")]
    pub input_dir: PathBuf,

    /// Skip files whose exact contents were already loaded into the target table.
    #[arg(long, default_value_t = false)]
    pub skip_loaded: bool,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Directory holding the `*.csvz` archives.
    #[arg(long, default_value = "..")]
    pub archive_dir: PathBuf,

    /// Directory receiving the CSV files and loaded from afterwards.
    #[arg(long, default_value = ".")]
    pub work_dir: PathBuf,

    /// Skip files whose exact contents were already loaded into the target table.
    #[arg(long, default_value_t = false)]
    pub skip_loaded: bool,
}

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Only count rows for this symbol.
    #[arg(long)]
    pub symbol: Option<String>,

    /// Number of ingest-log entries to show.
    #[arg(long, default_value_t = 10)]
    pub recent: usize,
}
