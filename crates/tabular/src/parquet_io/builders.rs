//! Build typed Arrow arrays from table rows.

use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanBuilder, Float64Builder, Int64Builder, StringBuilder};
use arrow::datatypes::{DataType, Schema};
use bitext_core::{CellValue, Table};

/// Build one array per schema field from the table rows.
///
/// Cells that do not match the column type are parsed from their text form
/// where possible. Anything that still does not fit becomes NULL.
pub(crate) fn build_arrays(table: &Table, schema: &Schema) -> Vec<ArrayRef> {
    let num_rows = table.row_count();
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());

    for (col_idx, field) in schema.fields().iter().enumerate() {
        let cells = table.rows.iter().map(|row| row.get(col_idx).unwrap_or(&CellValue::Null));

        let array: ArrayRef = match field.data_type() {
            DataType::Int64 => {
                let mut builder = Int64Builder::with_capacity(num_rows);
                for cell in cells {
                    builder.append_option(as_i64(cell));
                }
                Arc::new(builder.finish())
            }
            DataType::Float64 => {
                let mut builder = Float64Builder::with_capacity(num_rows);
                for cell in cells {
                    builder.append_option(as_f64(cell));
                }
                Arc::new(builder.finish())
            }
            DataType::Boolean => {
                let mut builder = BooleanBuilder::with_capacity(num_rows);
                for cell in cells {
                    builder.append_option(as_bool(cell));
                }
                Arc::new(builder.finish())
            }
            _ => {
                let mut builder = StringBuilder::with_capacity(num_rows, num_rows * 32);
                for cell in cells {
                    match cell {
                        CellValue::Null => builder.append_null(),
                        CellValue::Text(s) => builder.append_value(s),
                        other => builder.append_value(other.to_text_lossy()),
                    }
                }
                Arc::new(builder.finish())
            }
        };

        arrays.push(array);
    }

    arrays
}

fn as_i64(cell: &CellValue) -> Option<i64> {
    match cell {
        CellValue::Integer(v) => Some(*v),
        CellValue::Float(v) if v.fract() == 0.0 && v.is_finite() => Some(*v as i64),
        CellValue::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_f64(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Float(v) => Some(*v),
        CellValue::Integer(v) => Some(*v as f64),
        CellValue::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_bool(cell: &CellValue) -> Option<bool> {
    match cell {
        CellValue::Boolean(v) => Some(*v),
        CellValue::Text(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}
