use std::path::PathBuf;

use time::macros::format_description;
use time::Date;

use crate::Symbol;

/// One trading day of open/high/low/close/volume for a symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct EodRecord {
    pub date: Date,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Parsed contents of one record file.
#[derive(Debug, Clone, PartialEq)]
pub struct EodFile {
    pub symbol: Symbol,
    pub path: PathBuf,
    /// `<byte length>-<crc32>` of the raw file, in hex.
    pub checksum: String,
    pub records: Vec<EodRecord>,
}

impl EodFile {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse a trading date in any of the layouts seen in exported EOD files.
///
/// A trailing time-of-day (`2024-01-02 00:00:00`, `2024-01-02T00:00:00`) is ignored.
pub fn parse_trading_date(input: &str) -> Option<Date> {
    let value = input.trim();
    let date_part = value
        .split(|ch: char| ch == ' ' || ch == 'T')
        .next()
        .unwrap_or(value);

    let iso = format_description!("[year]-[month]-[day]");
    let slashed_iso = format_description!("[year]/[month]/[day]");
    let us = format_description!("[month padding:none]/[day padding:none]/[year]");

    Date::parse(date_part, &iso)
        .or_else(|_| Date::parse(date_part, &slashed_iso))
        .or_else(|_| Date::parse(date_part, &us))
        .ok()
}
