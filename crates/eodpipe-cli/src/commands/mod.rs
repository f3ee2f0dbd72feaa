mod inflate;
mod load;
mod pipeline;
mod status;

use eodpipe_warehouse::{Environment, Warehouse, WarehouseConfig};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub struct CommandResult {
    pub command: &'static str,
    pub data: Value,
    pub summary: Vec<String>,
}

impl CommandResult {
    pub fn ok(command: &'static str, data: Value) -> Self {
        Self {
            command,
            data,
            summary: Vec::new(),
        }
    }

    pub fn with_summary(mut self, line: impl Into<String>) -> Self {
        self.summary.push(line.into());
        self
    }
}

pub fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    match &cli.command {
        Command::Inflate(args) => inflate::run(args, cli.format),
        Command::Load(args) => load::run(args, &warehouse_config(cli), cli.format),
        Command::Run(args) => pipeline::run(args, &warehouse_config(cli), cli.format),
        Command::Status(args) => status::run(args, &warehouse_config(cli)),
    }
}

/// Environment/`.env` configuration with the global flags layered on top.
fn warehouse_config(cli: &Cli) -> WarehouseConfig {
    with_flag_overrides(cli, WarehouseConfig::default())
}

fn with_flag_overrides(cli: &Cli, mut config: WarehouseConfig) -> WarehouseConfig {
    if let Some(db) = &cli.db {
        config.db_path.clone_from(db);
    }
    if let Some(name) = &cli.environment {
        config.environment = Environment::from_name(name);
    }
    config
}

fn open_warehouse(config: &WarehouseConfig) -> Result<Warehouse, CliError> {
    let warehouse = Warehouse::open(config.clone())?;
    tracing::debug!(
        db = %warehouse.db_path().display(),
        table = warehouse.table(),
        "warehouse opened"
    );
    Ok(warehouse)
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::path::PathBuf;

    use clap::Parser;

    use super::*;

    fn env_config() -> WarehouseConfig {
        WarehouseConfig::from_lookup(|key| match key {
            "EODPIPE_HOME" => Some(OsString::from("/srv/eod")),
            "EODPIPE_DB_PATH" => Some(OsString::from("/srv/eod/from-env.duckdb")),
            _ => None,
        })
    }

    #[test]
    fn db_flag_overrides_environment_path() {
        let cli = Cli::try_parse_from(["eodpipe", "--db", "/tmp/flag.duckdb", "load"]).expect("parse");

        let config = with_flag_overrides(&cli, env_config());

        assert_eq!(config.db_path, PathBuf::from("/tmp/flag.duckdb"));
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn env_flag_selects_test_table() {
        let cli = Cli::try_parse_from(["eodpipe", "status", "--env", "staging"]).expect("parse");

        let config = with_flag_overrides(&cli, env_config());

        assert_eq!(config.environment.table(), "eod_stock_data_test");
        assert_eq!(config.db_path, PathBuf::from("/srv/eod/from-env.duckdb"));
    }

    #[test]
    fn no_flags_keep_environment_config() {
        let cli = Cli::try_parse_from(["eodpipe", "inflate"]).expect("parse");

        let config = with_flag_overrides(&cli, env_config());

        assert_eq!(config.db_path, PathBuf::from("/srv/eod/from-env.duckdb"));
        assert_eq!(config.environment.table(), "eod_stock_data");
    }
}
