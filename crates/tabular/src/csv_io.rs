//! Delimited-text tables. Every column reads as text; empty fields are null.

use std::path::Path;

use bitext_core::{BitextError, CellValue, Column, Table};
use csv::{ReaderBuilder, WriterBuilder};

fn csv_err(e: csv::Error) -> BitextError {
    BitextError::Csv(e.to_string())
}

pub fn read_csv(path: &Path) -> Result<Table, BitextError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let columns: Vec<Column> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(Column::text)
        .collect();
    let width = columns.len();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            BitextError::Csv(format!("failed to parse CSV row {}: {}", index + 1, e))
        })?;
        let mut row: Vec<CellValue> = record
            .iter()
            .take(width)
            .map(|field| {
                if field.is_empty() {
                    CellValue::Null
                } else {
                    CellValue::Text(field.to_string())
                }
            })
            .collect();
        row.resize(width, CellValue::Null);
        rows.push(row);
    }

    Ok(Table::with_rows(columns, rows))
}

pub fn write_csv(table: &Table, path: &Path) -> Result<u64, BitextError> {
    let mut writer = WriterBuilder::new().from_path(path).map_err(csv_err)?;
    writer
        .write_record(table.columns.iter().map(|c| c.name.as_str()))
        .map_err(csv_err)?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(CellValue::to_text_lossy))
            .map_err(csv_err)?;
    }
    writer.flush()?;
    Ok(table.row_count() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_headers_and_nulls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.csv");
        std::fs::write(
            &path,
            "id,nepali_col,english_col\n1,नमस्ते,Hello\n2,,\"Bye, then\"\n3,छोटो\n",
        )
        .unwrap();

        let table = read_csv(&path).unwrap();
        assert_eq!(table.column_names(), vec!["id", "nepali_col", "english_col"]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.rows[0][1], CellValue::from("नमस्ते"));
        assert_eq!(table.rows[1][1], CellValue::Null);
        assert_eq!(table.rows[1][2], CellValue::from("Bye, then"));
        // Short rows are padded with nulls.
        assert_eq!(table.rows[2][2], CellValue::Null);
    }

    #[test]
    fn write_then_read_keeps_order_and_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let table = Table::with_rows(
            vec![Column::text("b"), Column::text("a")],
            vec![
                vec!["line, with comma".into(), CellValue::Integer(7)],
                vec![CellValue::Null, "x".into()],
            ],
        );

        assert_eq!(write_csv(&table, &path).unwrap(), 2);
        let back = read_csv(&path).unwrap();
        assert_eq!(back.column_names(), vec!["b", "a"]);
        assert_eq!(back.rows[0][0], CellValue::from("line, with comma"));
        assert_eq!(back.rows[0][1], CellValue::from("7"));
        assert_eq!(back.rows[1][0], CellValue::Null);
    }
}
