use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] eodpipe_core::ValidationError),

    #[error(transparent)]
    Ingest(#[from] eodpipe_core::IngestError),

    #[error("warehouse error: {0}")]
    Warehouse(#[from] eodpipe_warehouse::WarehouseError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Ingest(_) => 3,
            Self::Warehouse(_) => 4,
            Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}
