use std::path::Path;

use bitext_core::{BitextError, Table};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::csv_io::write_csv;
use crate::format::TableFormat;
use crate::parquet_io::write_parquet;
use crate::xlsx::write_xlsx;

pub use crate::parquet_io::ParquetCompression;

/// Format-specific knobs for [`write_table`]. Options that do not apply to
/// the chosen format are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriteOptions {
    pub sheet_name: String,
    pub compression: ParquetCompression,
    pub row_group_rows: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            compression: ParquetCompression::default(),
            row_group_rows: 100_000,
        }
    }
}

/// Write `table` to `path` in the format implied by its extension, creating
/// parent directories. Returns the number of data rows written.
pub fn write_table(table: &Table, path: &Path, opts: &WriteOptions) -> Result<u64, BitextError> {
    let format = TableFormat::from_path(path)?;
    write_table_as(table, path, format, opts)
}

/// Like [`write_table`] with an explicit format.
pub fn write_table_as(
    table: &Table,
    path: &Path,
    format: TableFormat,
    opts: &WriteOptions,
) -> Result<u64, BitextError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let rows = match format {
        TableFormat::Csv => write_csv(table, path)?,
        TableFormat::Xlsx => write_xlsx(table, path, &opts.sheet_name)?,
        TableFormat::Parquet => {
            write_parquet(table, path, opts.compression, opts.row_group_rows)?
        }
    };

    info!("Wrote {} rows ({}) to {}", rows, format, path.display());
    Ok(rows)
}
