//! Inflate zlib-compressed record archives (`*.csvz`) into plain CSV files.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::ZlibDecoder;
use serde::Serialize;

use crate::{IngestError, Symbol};

/// File extension of compressed record archives.
pub const ARCHIVE_EXTENSION: &str = "csvz";

/// Outcome of inflating a single archive.
#[derive(Debug, Clone, Serialize)]
pub struct InflateReport {
    pub symbol: Symbol,
    pub source: PathBuf,
    pub output: PathBuf,
    pub compressed_bytes: u64,
    pub inflated_bytes: u64,
}

/// Decompress a complete zlib stream held in memory.
pub fn inflate_bytes(raw: &[u8]) -> Result<Vec<u8>, std::io::Error> {
    let mut decoder = ZlibDecoder::new(raw);
    let mut inflated = Vec::with_capacity(raw.len().saturating_mul(4));
    decoder.read_to_end(&mut inflated)?;
    Ok(inflated)
}

/// Resolve `<output_dir>/<symbol>.csv` for an archive path.
pub fn output_path_for(archive: &Path, output_dir: &Path) -> Result<(Symbol, PathBuf), IngestError> {
    let symbol = Symbol::from_archive_path(archive)?;
    let output = output_dir.join(format!("{symbol}.csv"));
    Ok((symbol, output))
}

/// Inflate one archive and write the result verbatim next to its siblings.
///
/// The whole stream is decompressed before the output is opened, so a corrupt
/// archive never leaves a truncated CSV behind. An existing output is overwritten.
pub fn inflate_file(archive: &Path, output_dir: &Path) -> Result<InflateReport, IngestError> {
    let (symbol, output) = output_path_for(archive, output_dir)?;

    let raw = fs::read(archive).map_err(|source| IngestError::io(archive, source))?;
    let inflated = inflate_bytes(&raw).map_err(|source| IngestError::Decompress {
        path: archive.to_path_buf(),
        source,
    })?;

    fs::write(&output, &inflated).map_err(|source| IngestError::io(&output, source))?;

    tracing::info!(
        %symbol,
        source = %archive.display(),
        output = %output.display(),
        compressed_bytes = raw.len(),
        inflated_bytes = inflated.len(),
        "inflated archive"
    );

    Ok(InflateReport {
        symbol,
        source: archive.to_path_buf(),
        output,
        compressed_bytes: raw.len() as u64,
        inflated_bytes: inflated.len() as u64,
    })
}
