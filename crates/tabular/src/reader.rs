use std::path::Path;

use bitext_core::{BitextError, Table};
use tracing::info;

use crate::csv_io::read_csv;
use crate::format::{SheetSelector, TableFormat};
use crate::parquet_io::read_parquet;
use crate::xlsx::read_xlsx;

/// Options for [`read_table`].
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Worksheet for workbook inputs.
    pub sheet: SheetSelector,
    /// Keep only these columns, in this order. `None` keeps all.
    pub columns: Option<Vec<String>>,
}

/// Load a CSV file, a workbook sheet, a Parquet file or a Parquet dataset
/// directory into a [`Table`].
pub fn read_table(path: &Path, opts: &ReadOptions) -> Result<Table, BitextError> {
    if !path.exists() {
        return Err(BitextError::MissingSource(path.display().to_string()));
    }
    let format = TableFormat::from_path(path)?;

    let table = match format {
        TableFormat::Csv => read_csv(path)?,
        TableFormat::Xlsx => read_xlsx(path, &opts.sheet)?,
        TableFormat::Parquet => read_parquet(path, opts.columns.as_deref())?,
    };

    let table = match &opts.columns {
        Some(columns) => project(table, columns)?,
        None => table,
    };

    info!(
        "Loaded {} rows x {} columns from {} ({})",
        table.row_count(),
        table.column_count(),
        path.display(),
        format
    );
    Ok(table)
}

/// Select and reorder columns by name.
pub fn project(table: Table, columns: &[String]) -> Result<Table, BitextError> {
    let indices: Vec<usize> = columns
        .iter()
        .map(|name| table.require_column(name))
        .collect::<Result<_, _>>()?;

    if indices.iter().copied().eq(0..table.column_count()) {
        return Ok(table);
    }

    let new_columns = indices.iter().map(|&i| table.columns[i].clone()).collect();
    let rows = table
        .rows
        .into_iter()
        .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
        .collect();
    Ok(Table::with_rows(new_columns, rows))
}
