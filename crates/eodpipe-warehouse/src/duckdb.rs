//! `DuckDB` connection setup.

use std::path::Path;

use ::duckdb::Connection;

/// Open the warehouse database file.
///
/// The pipeline is strictly sequential, so one connection per command is
/// opened here and kept for the lifetime of the [`crate::Warehouse`].
///
/// # Errors
/// Returns an error if the database file cannot be opened or configured.
pub fn open_connection(path: &Path) -> Result<Connection, ::duckdb::Error> {
    let connection = Connection::open(path)?;
    configure_connection(&connection)?;
    Ok(connection)
}

fn configure_connection(connection: &Connection) -> Result<(), ::duckdb::Error> {
    connection.execute_batch("PRAGMA disable_progress_bar;")?;
    Ok(())
}
