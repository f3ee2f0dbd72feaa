//! Decompress every archive in a directory.

use std::path::Path;

use eodpipe_core::{discover, inflate_file, output_path_for, InflateReport, ARCHIVE_EXTENSION};
use serde::Serialize;

use crate::cli::{InflateArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::CommandResult;

#[derive(Debug, Serialize)]
pub struct InflateSummary {
    pub archives: Vec<InflateReport>,
}

pub fn run(args: &InflateArgs, format: OutputFormat) -> Result<CommandResult, CliError> {
    let summary = inflate_all(&args.input_dir, &args.output_dir, format)?;
    let line = format!(
        "Inflated {} archive(s) into {}",
        summary.archives.len(),
        args.output_dir.display()
    );
    Ok(CommandResult::ok("inflate", serde_json::to_value(&summary)?).with_summary(line))
}

/// Inflate archives one at a time in path order; the first failure aborts.
pub fn inflate_all(
    input_dir: &Path,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<InflateSummary, CliError> {
    let mut archives = Vec::new();
    for archive in discover(input_dir, ARCHIVE_EXTENSION)? {
        let (symbol, _) = output_path_for(&archive, output_dir)?;
        output::progress(format, format!("Unpacking raw zlib compressed file {symbol}"));
        archives.push(inflate_file(&archive, output_dir)?);
    }
    Ok(InflateSummary { archives })
}
