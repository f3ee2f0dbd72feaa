//! Parse decompressed EOD record files.
//!
//! The first line is a header and is skipped whatever it says; columns are
//! positional: `Date, Open, High, Low, Close, Volume`.

use std::fs;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use flate2::Crc;

use crate::domain::parse_trading_date;
use crate::{EodFile, EodRecord, IngestError, Symbol};

/// File extension of decompressed record files.
pub const CSV_EXTENSION: &str = "csv";

/// Column order of a record file.
pub const COLUMNS: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

/// Read and fully parse one record file.
///
/// Nothing is returned until every row has parsed, so callers never see a
/// partially-read file.
pub fn read_eod_file(path: &Path) -> Result<EodFile, IngestError> {
    let symbol = Symbol::from_csv_path(path)?;
    let raw = fs::read(path).map_err(|source| IngestError::io(path, source))?;
    let label = path.display().to_string();
    let records = parse_eod_csv(raw.as_slice(), &label)?;

    tracing::debug!(%symbol, path = %label, rows = records.len(), "parsed record file");

    Ok(EodFile {
        symbol,
        path: path.to_path_buf(),
        checksum: content_checksum(&raw),
        records,
    })
}

/// Parse record rows from any reader. `label` names the source in errors.
pub fn parse_eod_csv<R: Read>(reader: R, label: &str) -> Result<Vec<EodRecord>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|source| IngestError::Csv {
            path: label.to_string(),
            source,
        })?;
        if is_blank(&row) {
            continue;
        }
        records.push(parse_row(&row, label)?);
    }

    Ok(records)
}

/// Checksum used to recognise a file that was already loaded.
pub fn content_checksum(raw: &[u8]) -> String {
    let mut crc = Crc::new();
    crc.update(raw);
    format!("{:x}-{:08x}", raw.len(), crc.sum())
}

fn parse_row(row: &StringRecord, label: &str) -> Result<EodRecord, IngestError> {
    let line = row.position().map_or(0, csv::Position::line);
    if row.len() != COLUMNS.len() {
        return Err(IngestError::MalformedRow {
            path: label.to_string(),
            line,
            expected: COLUMNS.len(),
            found: row.len(),
        });
    }

    let field = |index: usize| row.get(index).unwrap_or_default();
    let invalid = |name: &'static str, value: &str| IngestError::InvalidField {
        path: label.to_string(),
        line,
        field: name,
        value: value.to_string(),
    };

    let date = parse_trading_date(field(0)).ok_or_else(|| invalid("date", field(0)))?;
    let price = |index: usize, name: &'static str| {
        field(index)
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| invalid(name, field(index)))
    };

    Ok(EodRecord {
        date,
        open: price(1, "open")?,
        high: price(2, "high")?,
        low: price(3, "low")?,
        close: price(4, "close")?,
        volume: parse_volume(field(5)).ok_or_else(|| invalid("volume", field(5)))?,
    })
}

/// Volumes are integers, but pandas-written files can carry `1200.0`.
fn parse_volume(value: &str) -> Option<i64> {
    if let Ok(volume) = value.parse::<i64>() {
        return Some(volume);
    }
    let float = value.parse::<f64>().ok()?;
    if float.is_finite() && float.fract() == 0.0 && float.abs() < 9.0e15 {
        Some(float as i64)
    } else {
        None
    }
}

fn is_blank(row: &StringRecord) -> bool {
    row.iter().all(str::is_empty)
}
