//! Column type to Arrow type mapping and schema construction.

use arrow::datatypes::{DataType, Field, Schema};
use bitext_core::{Column, ColumnType};

pub fn column_type_to_arrow(column_type: ColumnType) -> DataType {
    match column_type {
        ColumnType::Text => DataType::Utf8,
        ColumnType::Integer => DataType::Int64,
        ColumnType::Float => DataType::Float64,
        ColumnType::Boolean => DataType::Boolean,
    }
}

/// Column type used for an Arrow column read from disk. Temporal, nested
/// and binary types fall back to text, as does `UInt64`, whose upper half
/// does not fit an `i64`.
pub fn arrow_to_column_type(data_type: &DataType) -> ColumnType {
    match data_type {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32 => ColumnType::Integer,

        DataType::Float16
        | DataType::Float32
        | DataType::Float64
        | DataType::Decimal128(_, _)
        | DataType::Decimal256(_, _) => ColumnType::Float,

        DataType::Boolean => ColumnType::Boolean,

        DataType::Dictionary(_, value) => arrow_to_column_type(value),

        _ => ColumnType::Text,
    }
}

/// True for Arrow types that cast losslessly to Utf8.
pub(crate) fn is_string_like(data_type: &DataType) -> bool {
    match data_type {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => true,
        DataType::Dictionary(_, value) => is_string_like(value),
        _ => false,
    }
}

/// Build an Arrow [`Schema`] from table columns. Every field is nullable.
pub fn build_schema(columns: &[Column]) -> Schema {
    let fields: Vec<Field> = columns
        .iter()
        .map(|col| Field::new(&col.name, column_type_to_arrow(col.column_type), true))
        .collect();
    Schema::new(fields)
}
