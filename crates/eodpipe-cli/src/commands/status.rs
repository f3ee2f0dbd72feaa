use eodpipe_core::Symbol;
use eodpipe_warehouse::{SymbolCount, WarehouseConfig};
use serde_json::json;

use crate::cli::StatusArgs;
use crate::error::CliError;

use super::{open_warehouse, CommandResult};

pub fn run(args: &StatusArgs, config: &WarehouseConfig) -> Result<CommandResult, CliError> {
    let symbol = args.symbol.as_deref().map(Symbol::parse).transpose()?;
    let warehouse = open_warehouse(config)?;

    let counts = match &symbol {
        Some(symbol) => vec![SymbolCount {
            symbol: symbol.as_str().to_string(),
            rows: warehouse.row_count(Some(symbol))?,
        }],
        None => warehouse.symbol_counts()?,
    };
    let recent = warehouse.recent_ingests(args.recent)?;

    let mut result = CommandResult::ok(
        "status",
        json!({
            "db_path": serde_json::to_value(warehouse.db_path())?,
            "table": warehouse.table(),
            "symbols": serde_json::to_value(&counts)?,
            "recent_loads": serde_json::to_value(&recent)?,
        }),
    )
    .with_summary(format!(
        "{} ({})",
        warehouse.table(),
        warehouse.db_path().display()
    ));

    for count in &counts {
        result = result.with_summary(format!("  {:<12} {:>10}", count.symbol, count.rows));
    }
    if !recent.is_empty() {
        result = result.with_summary("recent loads:");
        for entry in &recent {
            result = result.with_summary(format!(
                "  {} {} {} rows from {}",
                entry.loaded_at, entry.symbol, entry.row_count, entry.path
            ));
        }
    }

    Ok(result)
}
