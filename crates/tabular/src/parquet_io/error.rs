//! Error types for Parquet conversion.

use bitext_core::BitextError;

/// Errors raised while converting between tables and Arrow/Parquet.
#[derive(Debug, thiserror::Error)]
pub enum ParquetIoError {
    /// Failed to build or cast Arrow arrays.
    #[error("Arrow conversion error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Failed to read or write the Parquet file.
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ParquetIoError> for BitextError {
    fn from(err: ParquetIoError) -> Self {
        match err {
            ParquetIoError::Arrow(e) => BitextError::Arrow(e.to_string()),
            ParquetIoError::Parquet(e) => BitextError::Parquet(e.to_string()),
            ParquetIoError::Io(e) => BitextError::Io(e),
        }
    }
}
