//! Statement-level seam between a parsed record file and its destination.

use eodpipe_core::{EodFile, EodRecord, Symbol};

use crate::WarehouseError;

/// Destination for single-row EOD inserts grouped into one transaction.
pub trait EodSink {
    fn begin(&mut self) -> Result<(), WarehouseError>;

    fn insert(&mut self, symbol: &Symbol, record: &EodRecord) -> Result<(), WarehouseError>;

    /// Runs after the last insert and before `commit`, in the same transaction.
    fn finish(&mut self, _file: &EodFile, _inserted: usize) -> Result<(), WarehouseError> {
        Ok(())
    }

    fn commit(&mut self) -> Result<(), WarehouseError>;

    /// Best effort; the original error is what gets reported.
    fn rollback(&mut self);
}

/// Insert every record of `file` in order, then commit once.
///
/// Any failed insert, `finish` or `commit` rolls the whole file back and
/// returns that error. Returns the number of rows inserted.
pub fn load_file<S: EodSink + ?Sized>(sink: &mut S, file: &EodFile) -> Result<usize, WarehouseError> {
    sink.begin()?;
    let outcome = insert_all(sink, file).and_then(|inserted| {
        sink.finish(file, inserted)?;
        sink.commit()?;
        Ok(inserted)
    });
    if outcome.is_err() {
        sink.rollback();
    }
    outcome
}

fn insert_all<S: EodSink + ?Sized>(sink: &mut S, file: &EodFile) -> Result<usize, WarehouseError> {
    for record in &file.records {
        sink.insert(&file.symbol, record)?;
    }
    Ok(file.records.len())
}
