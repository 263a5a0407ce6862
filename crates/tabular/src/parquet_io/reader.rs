use std::fs::File;
use std::path::{Path, PathBuf};

use bitext_core::{BitextError, Column, ColumnType, Table};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ProjectionMask;
use tracing::{debug, info};

use super::convert::batch_to_rows;
use super::error::ParquetIoError;
use super::schema::arrow_to_column_type;

/// Read a Parquet file, or every `*.parquet` file of a dataset directory in
/// name order, into one table.
///
/// When `columns` is given only those columns are decoded. The resulting
/// table keeps the file's column order.
pub fn read_parquet(path: &Path, columns: Option<&[String]>) -> Result<Table, BitextError> {
    if !path.is_dir() {
        return read_file(path, columns);
    }

    let files = list_dataset_files(path)?;
    if files.is_empty() {
        return Err(BitextError::MissingSource(format!(
            "no .parquet files in {}",
            path.display()
        )));
    }

    let mut combined: Option<Table> = None;
    for file in &files {
        let part = read_file(file, columns)?;
        combined = Some(match combined {
            None => part,
            Some(acc) => append_part(acc, part, file)?,
        });
    }

    let table = combined.unwrap_or_default();
    info!(
        "Loaded {} rows from {} dataset files in {}",
        table.row_count(),
        files.len(),
        path.display()
    );
    Ok(table)
}

/// Sorted `*.parquet` files directly inside `dir`.
pub fn list_dataset_files(dir: &Path) -> Result<Vec<PathBuf>, BitextError> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("parquet"))
        })
        .collect();
    files.sort();
    Ok(files)
}

fn read_file(path: &Path, columns: Option<&[String]>) -> Result<Table, BitextError> {
    if !path.exists() {
        return Err(BitextError::MissingSource(path.display().to_string()));
    }
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(ParquetIoError::from)?;
    let arrow_schema = builder.schema().clone();

    let mut indices: Vec<usize> = match columns {
        Some(names) => names
            .iter()
            .map(|name| {
                arrow_schema
                    .index_of(name)
                    .map_err(|_| BitextError::MissingColumn {
                        column: name.clone(),
                        available: arrow_schema
                            .fields()
                            .iter()
                            .map(|f| f.name().clone())
                            .collect(),
                    })
            })
            .collect::<Result<_, _>>()?,
        None => (0..arrow_schema.fields().len()).collect(),
    };
    indices.sort_unstable();
    indices.dedup();

    let table_columns: Vec<Column> = indices
        .iter()
        .map(|&i| {
            let field = arrow_schema.field(i);
            Column::new(field.name().clone(), arrow_to_column_type(field.data_type()))
        })
        .collect();
    let column_types: Vec<ColumnType> = table_columns.iter().map(|c| c.column_type).collect();

    let mask = ProjectionMask::roots(builder.parquet_schema(), indices.iter().copied());
    let reader = builder
        .with_projection(mask)
        .build()
        .map_err(ParquetIoError::from)?;

    let mut table = Table::new(table_columns);
    for batch in reader {
        let batch = batch.map_err(ParquetIoError::from)?;
        table.rows.extend(batch_to_rows(&batch, &column_types)?);
    }

    debug!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "Read Parquet file"
    );
    Ok(table)
}

fn append_part(mut acc: Table, part: Table, file: &Path) -> Result<Table, BitextError> {
    if acc.column_names() != part.column_names() {
        return Err(BitextError::Parquet(format!(
            "{} has columns {:?}, expected {:?}",
            file.display(),
            part.column_names(),
            acc.column_names()
        )));
    }
    for (existing, incoming) in acc.columns.iter_mut().zip(&part.columns) {
        if existing.column_type != incoming.column_type {
            existing.column_type = ColumnType::Text;
        }
    }
    acc.rows.extend(part.rows);
    Ok(acc)
}
