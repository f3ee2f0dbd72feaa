//! Core pieces of the eodpipe stock-data pipeline.
//!
//! This crate contains:
//! - Domain types (`Symbol`, `EodRecord`, `EodFile`)
//! - Archive inflation for zlib-compressed `*.csvz` files
//! - Parsing of decompressed EOD record files
//! - Directory discovery for both stages

pub mod archive;
pub mod discovery;
pub mod domain;
pub mod eod_csv;
pub mod error;

pub use archive::{inflate_bytes, inflate_file, output_path_for, InflateReport, ARCHIVE_EXTENSION};
pub use discovery::discover;
pub use domain::{parse_trading_date, EodFile, EodRecord, Symbol};
pub use eod_csv::{content_checksum, parse_eod_csv, read_eod_file, COLUMNS, CSV_EXTENSION};
pub use error::{IngestError, ValidationError};
