//! Load every record file in a directory into the warehouse.

use std::path::{Path, PathBuf};

use eodpipe_core::{discover, read_eod_file, CSV_EXTENSION};
use eodpipe_warehouse::{LoadReport, Warehouse, WarehouseConfig};
use serde::Serialize;

use crate::cli::{LoadArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::{open_warehouse, CommandResult};

#[derive(Debug, Serialize)]
pub struct LoadSummary {
    pub current_date: String,
    pub table: &'static str,
    pub files: Vec<LoadReport>,
    pub skipped: Vec<PathBuf>,
    pub rows_inserted: usize,
}

impl LoadSummary {
    pub fn line(&self) -> String {
        let mut line = format!(
            "Loaded {} row(s) from {} file(s) into {}",
            self.rows_inserted,
            self.files.len(),
            self.table
        );
        if !self.skipped.is_empty() {
            line.push_str(&format!(", skipped {} already-loaded file(s)", self.skipped.len()));
        }
        line
    }
}

pub fn run(
    args: &LoadArgs,
    config: &WarehouseConfig,
    format: OutputFormat,
) -> Result<CommandResult, CliError> {
    let mut warehouse = open_warehouse(config)?;
    let summary = load_all(&mut warehouse, &args.input_dir, args.skip_loaded, format)?;
    let line = summary.line();
    Ok(CommandResult::ok("load", serde_json::to_value(&summary)?).with_summary(line))
}

/// Load record files one at a time in path order; the first failure aborts.
///
/// Files already committed before a failure stay committed.
pub fn load_all(
    warehouse: &mut Warehouse,
    input_dir: &Path,
    skip_loaded: bool,
    format: OutputFormat,
) -> Result<LoadSummary, CliError> {
    let current_date = warehouse.current_date()?;
    output::progress(format, format!("Current date is: {current_date}"));

    let mut files = Vec::new();
    let mut skipped = Vec::new();
    for path in discover(input_dir, CSV_EXTENSION)? {
        let file = read_eod_file(&path)?;
        if skip_loaded && warehouse.already_loaded(&file.checksum)? {
            tracing::info!(symbol = %file.symbol, path = %path.display(), "skipping already-loaded file");
            skipped.push(path);
            continue;
        }

        output::progress(format, format!("Copying stock {} data to database", file.symbol));
        files.push(warehouse.load(&file)?);
    }

    let rows_inserted = files.iter().map(|report| report.rows_inserted).sum();
    Ok(LoadSummary {
        current_date,
        table: warehouse.table(),
        files,
        skipped,
        rows_inserted,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use eodpipe_core::Symbol;
    use eodpipe_warehouse::Environment;
    use tempfile::tempdir;

    use super::*;

    const CSV: &str = "Date,Open,High,Low,Close,Volume\n\
2024-02-01,35.1,35.6,34.9,35.2,120000\n\
2024-02-02,35.2,35.9,35.0,35.8,98000\n";

    fn warehouse(dir: &Path) -> Warehouse {
        Warehouse::open(WarehouseConfig {
            eodpipe_home: dir.to_path_buf(),
            db_path: dir.join("warehouse.duckdb"),
            environment: Environment::Production,
        })
        .expect("warehouse open")
    }

    #[test]
    fn rerun_duplicates_rows_by_default() {
        let temp = tempdir().expect("tempdir");
        let csv_dir = temp.path().join("csv");
        fs::create_dir(&csv_dir).expect("mkdir");
        fs::write(csv_dir.join("BPI.csv"), CSV).expect("write");
        let mut warehouse = warehouse(temp.path());

        load_all(&mut warehouse, &csv_dir, false, OutputFormat::Json).expect("first");
        let second = load_all(&mut warehouse, &csv_dir, false, OutputFormat::Json).expect("second");

        assert_eq!(second.rows_inserted, 2);
        assert_eq!(warehouse.row_count(None).expect("count"), 4);
    }

    #[test]
    fn skip_loaded_ignores_identical_files() {
        let temp = tempdir().expect("tempdir");
        let csv_dir = temp.path().join("csv");
        fs::create_dir(&csv_dir).expect("mkdir");
        fs::write(csv_dir.join("BPI.csv"), CSV).expect("write");
        let mut warehouse = warehouse(temp.path());

        load_all(&mut warehouse, &csv_dir, true, OutputFormat::Json).expect("first");
        let second = load_all(&mut warehouse, &csv_dir, true, OutputFormat::Json).expect("second");

        assert!(second.files.is_empty());
        assert_eq!(second.skipped, vec![csv_dir.join("BPI.csv")]);
        assert_eq!(warehouse.row_count(None).expect("count"), 2);
        assert!(second.line().contains("skipped 1"));
    }

    #[test]
    fn file_names_with_spaces_load_under_the_verbatim_symbol() {
        let temp = tempdir().expect("tempdir");
        let csv_dir = temp.path().join("csv");
        fs::create_dir(&csv_dir).expect("mkdir");
        fs::write(csv_dir.join("AC EN.csv"), CSV).expect("write");
        let mut warehouse = warehouse(temp.path());

        let summary = load_all(&mut warehouse, &csv_dir, false, OutputFormat::Json).expect("load");

        assert_eq!(summary.files[0].symbol.as_str(), "AC EN");
        let symbol = Symbol::parse("AC EN").expect("symbol");
        assert_eq!(warehouse.row_count(Some(&symbol)).expect("count"), 2);
    }

    #[test]
    fn malformed_file_aborts_after_earlier_files_commit() {
        let temp = tempdir().expect("tempdir");
        let csv_dir = temp.path().join("csv");
        fs::create_dir(&csv_dir).expect("mkdir");
        fs::write(csv_dir.join("AC.csv"), CSV).expect("write");
        fs::write(
            csv_dir.join("ZZ.csv"),
            "Date,Open,High,Low,Close,Volume\n2024-02-01,1,2,0.5\n",
        )
        .expect("write");
        let mut warehouse = warehouse(temp.path());

        let error = load_all(&mut warehouse, &csv_dir, false, OutputFormat::Json)
            .expect_err("must fail");

        assert_eq!(error.exit_code(), 3);
        let zz = Symbol::parse("ZZ").expect("symbol");
        assert_eq!(warehouse.row_count(Some(&zz)).expect("count"), 0);
        assert_eq!(warehouse.row_count(None).expect("count"), 2);
    }
}
