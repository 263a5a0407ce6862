//! Arrow record batches back into table rows.

use arrow::array::{Array, ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::compute::{cast, cast_with_options, CastOptions};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use bitext_core::{CellValue, ColumnType};

use super::error::ParquetIoError;
use super::schema::is_string_like;

/// Convert every column of `batch` using the given per-column types and
/// return the rows in batch order.
pub fn batch_to_rows(
    batch: &RecordBatch,
    column_types: &[ColumnType],
) -> Result<Vec<Vec<CellValue>>, ParquetIoError> {
    let num_rows = batch.num_rows();
    let mut rows: Vec<Vec<CellValue>> = (0..num_rows)
        .map(|_| Vec::with_capacity(batch.num_columns()))
        .collect();

    for (col_idx, column) in batch.columns().iter().enumerate() {
        let column_type = column_types.get(col_idx).copied().unwrap_or(ColumnType::Text);
        let cells = column_cells(column, column_type)?;
        for (row, cell) in rows.iter_mut().zip(cells) {
            row.push(cell);
        }
    }

    Ok(rows)
}

fn column_cells(
    array: &ArrayRef,
    column_type: ColumnType,
) -> Result<Vec<CellValue>, ParquetIoError> {
    let len = array.len();
    let cells = match column_type {
        ColumnType::Integer => {
            // Out-of-range values must fail rather than read back as null.
            let options = CastOptions {
                safe: false,
                format_options: FormatOptions::default(),
            };
            let cast_array = cast_with_options(array, &DataType::Int64, &options)?;
            let ints = downcast::<Int64Array>(&cast_array)?;
            (0..len)
                .map(|i| {
                    if ints.is_null(i) {
                        CellValue::Null
                    } else {
                        CellValue::Integer(ints.value(i))
                    }
                })
                .collect()
        }
        ColumnType::Float => {
            let cast_array = cast(array, &DataType::Float64)?;
            let floats = downcast::<Float64Array>(&cast_array)?;
            (0..len)
                .map(|i| {
                    if floats.is_null(i) {
                        CellValue::Null
                    } else {
                        CellValue::Float(floats.value(i))
                    }
                })
                .collect()
        }
        ColumnType::Boolean => {
            let cast_array = cast(array, &DataType::Boolean)?;
            let bools = downcast::<BooleanArray>(&cast_array)?;
            (0..len)
                .map(|i| {
                    if bools.is_null(i) {
                        CellValue::Null
                    } else {
                        CellValue::Boolean(bools.value(i))
                    }
                })
                .collect()
        }
        ColumnType::Text if is_string_like(array.data_type()) => {
            let cast_array = cast(array, &DataType::Utf8)?;
            let strings = downcast::<StringArray>(&cast_array)?;
            (0..len)
                .map(|i| {
                    if strings.is_null(i) {
                        CellValue::Null
                    } else {
                        CellValue::Text(strings.value(i).to_string())
                    }
                })
                .collect()
        }
        ColumnType::Text => {
            let options = FormatOptions::default();
            let formatter = ArrayFormatter::try_new(array.as_ref(), &options)?;
            (0..len)
                .map(|i| {
                    if array.is_null(i) {
                        CellValue::Null
                    } else {
                        CellValue::Text(formatter.value(i).to_string())
                    }
                })
                .collect()
        }
    };
    Ok(cells)
}

fn downcast<T: 'static>(array: &ArrayRef) -> Result<&T, ParquetIoError> {
    array.as_any().downcast_ref::<T>().ok_or_else(|| {
        ParquetIoError::Arrow(arrow::error::ArrowError::CastError(format!(
            "unexpected array type {}",
            array.data_type()
        )))
    })
}
