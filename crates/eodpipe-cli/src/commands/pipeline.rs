//! Both stages back to back. They still only share the work directory.

use eodpipe_warehouse::WarehouseConfig;
use serde_json::json;

use crate::cli::{OutputFormat, RunArgs};
use crate::error::CliError;

use super::inflate::inflate_all;
use super::load::load_all;
use super::{open_warehouse, CommandResult};

pub fn run(
    args: &RunArgs,
    config: &WarehouseConfig,
    format: OutputFormat,
) -> Result<CommandResult, CliError> {
    let inflated = inflate_all(&args.archive_dir, &args.work_dir, format)?;

    let mut warehouse = open_warehouse(config)?;
    let loaded = load_all(&mut warehouse, &args.work_dir, args.skip_loaded, format)?;

    let inflate_line = format!("Inflated {} archive(s)", inflated.archives.len());
    let load_line = loaded.line();
    let data = json!({
        "inflate": serde_json::to_value(&inflated)?,
        "load": serde_json::to_value(&loaded)?,
    });

    Ok(CommandResult::ok("run", data)
        .with_summary(inflate_line)
        .with_summary(load_line))
}
