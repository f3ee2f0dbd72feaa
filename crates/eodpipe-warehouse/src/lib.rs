//! # eodpipe warehouse
//!
//! DuckDB storage for end-of-day stock rows.
//!
//! ## Tables
//!
//! | Table | Description |
//! |-------|-------------|
//! | `eod_stock_data` | Production EOD rows, append-only |
//! | `eod_stock_data_test` | Same layout, written when the environment is not `production` |
//! | `ingest_log` | One row per loaded file with its checksum |
//!
//! ## Configuration
//!
//! | Env Var | Default | Purpose |
//! |---------|---------|---------|
//! | `EODPIPE_HOME` | `$HOME/.eodpipe` | Base directory |
//! | `EODPIPE_DB_PATH` | `<home>/warehouse.duckdb` | Database file |
//! | `EODPIPE_ENV` | `production` | Selects the target table |
//!
//! Every insert is parameterized; only the table name is spliced into SQL, and
//! it comes from the closed [`Environment`] enum.

pub mod duckdb;
pub mod migrations;
pub mod sink;

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use ::duckdb::{params, Connection};
use eodpipe_core::{EodFile, EodRecord, Symbol};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub use sink::{load_file, EodSink};

#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error(transparent)]
    DuckDb(#[from] ::duckdb::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid warehouse configuration: {0}")]
    InvalidConfig(String),
}

/// Deployment environment; decides which EOD table receives rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Production,
    Test,
}

impl Environment {
    /// `production` (or nothing) selects production; any other name is a test run.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Test
        }
    }

    pub const fn table(self) -> &'static str {
        match self {
            Self::Production => "eod_stock_data",
            Self::Test => "eod_stock_data_test",
        }
    }
}

#[derive(Debug, Clone)]
pub struct WarehouseConfig {
    pub eodpipe_home: PathBuf,
    pub db_path: PathBuf,
    pub environment: Environment,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }
}

impl WarehouseConfig {
    /// Resolve configuration through `lookup`, normally the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let eodpipe_home = match non_empty("EODPIPE_HOME") {
            Some(path) => PathBuf::from(path),
            None => match non_empty("HOME") {
                Some(home) => PathBuf::from(home).join(".eodpipe"),
                None => PathBuf::from(".eodpipe"),
            },
        };
        let db_path = non_empty("EODPIPE_DB_PATH")
            .map_or_else(|| eodpipe_home.join("warehouse.duckdb"), PathBuf::from);
        let environment = non_empty("EODPIPE_ENV").map_or(Environment::Production, |name| {
            Environment::from_name(&name.to_string_lossy())
        });

        tracing::debug!(
            home = %eodpipe_home.display(),
            db = %db_path.display(),
            ?environment,
            "resolved warehouse configuration"
        );

        Self {
            eodpipe_home,
            db_path,
            environment,
        }
    }

    fn validate(&self) -> Result<(), WarehouseError> {
        if self.db_path.as_os_str().is_empty() {
            return Err(WarehouseError::InvalidConfig(String::from(
                "database path must not be empty",
            )));
        }
        if self.db_path.is_dir() {
            return Err(WarehouseError::InvalidConfig(format!(
                "database path '{}' is a directory",
                self.db_path.display()
            )));
        }
        Ok(())
    }
}

/// Outcome of loading one record file.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub request_id: String,
    pub symbol: Symbol,
    pub path: PathBuf,
    pub table: &'static str,
    pub rows_inserted: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolCount {
    pub symbol: String,
    pub rows: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestLogEntry {
    pub request_id: String,
    pub symbol: String,
    pub path: String,
    pub checksum: String,
    pub target_table: String,
    pub row_count: i64,
    pub loaded_at: String,
}

pub struct Warehouse {
    config: WarehouseConfig,
    connection: Connection,
}

impl Warehouse {
    pub fn open(config: WarehouseConfig) -> Result<Self, WarehouseError> {
        config.validate()?;
        if let Some(parent) = config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let connection = duckdb::open_connection(config.db_path.as_path())?;
        migrations::apply_migrations(&connection)?;
        Ok(Self { config, connection })
    }

    pub fn db_path(&self) -> &Path {
        self.config.db_path.as_path()
    }

    pub fn table(&self) -> &'static str {
        self.config.environment.table()
    }

    /// Round-trip to the database, used as a connectivity check before loading.
    pub fn current_date(&self) -> Result<String, WarehouseError> {
        let date: String =
            self.connection
                .query_row("SELECT CAST(current_date AS VARCHAR)", [], |row| row.get(0))?;
        Ok(date)
    }

    /// Load one parsed file and its `ingest_log` row in a single transaction.
    ///
    /// Loads are append-only: loading the same file twice stores its rows twice.
    pub fn load(&mut self, file: &EodFile) -> Result<LoadReport, WarehouseError> {
        let request_id = format!("load:{}", Uuid::new_v4());
        let mut sink = LoggedLoad {
            warehouse: self,
            request_id: request_id.as_str(),
        };
        let rows_inserted = load_file(&mut sink, file)?;

        tracing::info!(
            symbol = %file.symbol,
            path = %file.path.display(),
            table = self.table(),
            rows = rows_inserted,
            "loaded record file"
        );

        Ok(LoadReport {
            request_id,
            symbol: file.symbol.clone(),
            path: file.path.clone(),
            table: self.table(),
            rows_inserted,
        })
    }

    /// Whether a file with this checksum was already loaded into the current table.
    pub fn already_loaded(&self, checksum: &str) -> Result<bool, WarehouseError> {
        let count: i64 = self.connection.query_row(
            "SELECT COUNT(*) FROM ingest_log WHERE checksum = ? AND target_table = ?",
            params![checksum, self.table()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    pub fn row_count(&self, symbol: Option<&Symbol>) -> Result<i64, WarehouseError> {
        let count: i64 = match symbol {
            Some(symbol) => self.connection.query_row(
                format!("SELECT COUNT(*) FROM {} WHERE symbol = ?", self.table()).as_str(),
                params![symbol.as_str()],
                |row| row.get(0),
            )?,
            None => self.connection.query_row(
                format!("SELECT COUNT(*) FROM {}", self.table()).as_str(),
                [],
                |row| row.get(0),
            )?,
        };
        Ok(count)
    }

    pub fn symbol_counts(&self) -> Result<Vec<SymbolCount>, WarehouseError> {
        let sql = format!(
            "SELECT symbol, COUNT(*) FROM {} GROUP BY symbol ORDER BY symbol",
            self.table()
        );
        let mut statement = self.connection.prepare(sql.as_str())?;
        let rows = statement.query_map([], |row| {
            Ok(SymbolCount {
                symbol: row.get(0)?,
                rows: row.get(1)?,
            })
        })?;
        let counts = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(counts)
    }

    pub fn recent_ingests(&self, limit: usize) -> Result<Vec<IngestLogEntry>, WarehouseError> {
        let sql = format!(
            r#"
SELECT request_id, symbol, path, checksum, target_table, row_count,
       CAST(loaded_at AS VARCHAR)
FROM ingest_log
ORDER BY loaded_at DESC
LIMIT {limit}
"#
        );
        let mut statement = self.connection.prepare(sql.as_str())?;
        let rows = statement.query_map([], |row| {
            Ok(IngestLogEntry {
                request_id: row.get(0)?,
                symbol: row.get(1)?,
                path: row.get(2)?,
                checksum: row.get(3)?,
                target_table: row.get(4)?,
                row_count: row.get(5)?,
                loaded_at: row.get(6)?,
            })
        })?;
        let entries = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    fn record_ingest(
        &self,
        request_id: &str,
        file: &EodFile,
        row_count: usize,
    ) -> Result<(), WarehouseError> {
        self.connection.execute(
            r#"
INSERT INTO ingest_log (request_id, symbol, path, checksum, target_table, row_count, loaded_at)
VALUES (?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP)
"#,
            params![
                request_id,
                file.symbol.as_str(),
                path_to_sql(file.path.as_path()),
                file.checksum.as_str(),
                self.table(),
                row_count as i64,
            ],
        )?;
        Ok(())
    }
}

impl EodSink for Warehouse {
    fn begin(&mut self) -> Result<(), WarehouseError> {
        self.connection.execute_batch("BEGIN TRANSACTION")?;
        Ok(())
    }

    fn insert(&mut self, symbol: &Symbol, record: &EodRecord) -> Result<(), WarehouseError> {
        let sql = format!(
            "INSERT INTO {} (date, open, high, low, close, volume, symbol) \
             VALUES (CAST(? AS DATE), ?, ?, ?, ?, ?, ?)",
            self.table()
        );
        self.connection.execute(
            sql.as_str(),
            params![
                record.date.to_string(),
                record.open,
                record.high,
                record.low,
                record.close,
                record.volume,
                symbol.as_str(),
            ],
        )?;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), WarehouseError> {
        self.connection.execute_batch("COMMIT")?;
        Ok(())
    }

    fn rollback(&mut self) {
        if let Err(error) = self.connection.execute_batch("ROLLBACK") {
            tracing::warn!(%error, "rollback failed");
        }
    }
}

/// Warehouse sink that writes the `ingest_log` row before the file commits.
struct LoggedLoad<'a> {
    warehouse: &'a mut Warehouse,
    request_id: &'a str,
}

impl EodSink for LoggedLoad<'_> {
    fn begin(&mut self) -> Result<(), WarehouseError> {
        self.warehouse.begin()
    }

    fn insert(&mut self, symbol: &Symbol, record: &EodRecord) -> Result<(), WarehouseError> {
        self.warehouse.insert(symbol, record)
    }

    fn finish(&mut self, file: &EodFile, inserted: usize) -> Result<(), WarehouseError> {
        self.warehouse.record_ingest(self.request_id, file, inserted)
    }

    fn commit(&mut self) -> Result<(), WarehouseError> {
        self.warehouse.commit()
    }

    fn rollback(&mut self) {
        self.warehouse.rollback();
    }
}

fn path_to_sql(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
