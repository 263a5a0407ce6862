//! Public API for writing tables to Parquet format.

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use arrow::record_batch::RecordBatch;
use bitext_core::{BitextError, Table};
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::builders::build_arrays;
use super::error::ParquetIoError;
use super::schema::build_schema;

/// Output codec for Parquet files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParquetCompression {
    #[default]
    Snappy,
    Gzip,
    Zstd,
    None,
}

impl ParquetCompression {
    pub fn to_parquet(self) -> Compression {
        match self {
            ParquetCompression::Snappy => Compression::SNAPPY,
            ParquetCompression::Gzip => Compression::GZIP(Default::default()),
            ParquetCompression::Zstd => Compression::ZSTD(Default::default()),
            ParquetCompression::None => Compression::UNCOMPRESSED,
        }
    }
}

impl fmt::Display for ParquetCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParquetCompression::Snappy => "snappy",
            ParquetCompression::Gzip => "gzip",
            ParquetCompression::Zstd => "zstd",
            ParquetCompression::None => "none",
        };
        f.write_str(name)
    }
}

impl FromStr for ParquetCompression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "snappy" => Ok(ParquetCompression::Snappy),
            "gzip" => Ok(ParquetCompression::Gzip),
            "zstd" => Ok(ParquetCompression::Zstd),
            "none" | "uncompressed" => Ok(ParquetCompression::None),
            other => Err(format!(
                "unknown compression '{other}' (snappy, gzip, zstd, none)"
            )),
        }
    }
}

/// Writer properties shared by table writes and the streaming splitter.
pub fn writer_properties(
    compression: ParquetCompression,
    row_group_rows: usize,
) -> WriterProperties {
    WriterProperties::builder()
        .set_compression(compression.to_parquet())
        .set_max_row_group_size(row_group_rows.max(1))
        .build()
}

/// Convert a [`Table`] into a single Arrow [`RecordBatch`].
pub fn table_to_record_batch(table: &Table) -> Result<RecordBatch, BitextError> {
    if table.columns.is_empty() {
        return Err(BitextError::InvalidArgument(
            "cannot write a table with no columns to Parquet".to_string(),
        ));
    }
    let schema = Arc::new(build_schema(&table.columns));
    let arrays = build_arrays(table, &schema);
    let batch = RecordBatch::try_new(schema, arrays).map_err(ParquetIoError::from)?;
    Ok(batch)
}

/// Write a [`Table`] to a Parquet file, creating parent directories.
/// Returns the number of rows written.
pub fn write_parquet(
    table: &Table,
    path: &Path,
    compression: ParquetCompression,
    row_group_rows: usize,
) -> Result<u64, BitextError> {
    let batch = table_to_record_batch(table)?;
    let row_count = batch.num_rows() as u64;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    let props = writer_properties(compression, row_group_rows);

    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), Some(props)).map_err(ParquetIoError::from)?;
    writer.write(&batch).map_err(ParquetIoError::from)?;
    writer.close().map_err(ParquetIoError::from)?;

    debug!(
        path = %path.display(),
        rows = row_count,
        compression = %compression,
        "Wrote Parquet file"
    );

    Ok(row_count)
}
