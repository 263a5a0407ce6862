//! Excel workbooks: calamine for reading, rust_xlsxwriter for writing.

use std::path::Path;

use bitext_core::{BitextError, CellValue, Column, ColumnType, Table};
use calamine::{open_workbook_auto, Data, Range, Reader};
use rust_xlsxwriter::{Workbook, XlsxError};

use crate::format::SheetSelector;

/// Data rows that fit under the header row of a single worksheet.
pub const MAX_SHEET_ROWS: usize = 1_048_575;
pub const MAX_SHEET_COLUMNS: usize = 16_384;

fn excel_err(e: impl std::fmt::Display) -> BitextError {
    BitextError::Excel(e.to_string())
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::String(s) if s.is_empty() => CellValue::Null,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(v) => CellValue::Integer(*v),
        Data::Float(v) => CellValue::Float(*v),
        Data::Bool(v) => CellValue::Boolean(*v),
        Data::Error(_) => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

fn header_name(index: usize, data: Option<&Data>) -> String {
    match data.map(cell_from_data) {
        None | Some(CellValue::Null) => format!("Unnamed: {index}"),
        Some(value) => value.to_text_lossy(),
    }
}

fn table_from_range(range: &Range<Data>) -> Table {
    let mut rows_iter = range.rows();
    let Some(header) = rows_iter.next() else {
        return Table::default();
    };
    let width = header.len();
    let names: Vec<String> = (0..width).map(|i| header_name(i, header.get(i))).collect();

    let rows: Vec<Vec<CellValue>> = rows_iter
        .map(|row| {
            (0..width)
                .map(|i| row.get(i).map(cell_from_data).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    let columns = names
        .into_iter()
        .enumerate()
        .map(|(i, name)| Column::new(name, ColumnType::infer(rows.iter().map(|r| &r[i]))))
        .collect();

    Table::with_rows(columns, rows)
}

/// Read one worksheet. The first row supplies column names; blank header
/// cells are named `Unnamed: {index}`.
pub fn read_xlsx(path: &Path, sheet: &SheetSelector) -> Result<Table, BitextError> {
    let mut workbook = open_workbook_auto(path).map_err(excel_err)?;
    let sheet_names = workbook.sheet_names().to_vec();

    let range = match sheet {
        SheetSelector::Index(idx) => workbook
            .worksheet_range_at(*idx)
            .ok_or_else(|| {
                BitextError::MissingSource(format!(
                    "sheet index {idx} in {} (sheets: {sheet_names:?})",
                    path.display()
                ))
            })?
            .map_err(excel_err)?,
        SheetSelector::Name(name) => {
            if !sheet_names.iter().any(|s| s == name) {
                return Err(BitextError::MissingSource(format!(
                    "sheet '{name}' in {} (sheets: {sheet_names:?})",
                    path.display()
                )));
            }
            workbook.worksheet_range(name).map_err(excel_err)?
        }
    };

    Ok(table_from_range(&range))
}

/// Write the table to a single worksheet with a header row.
pub fn write_xlsx(table: &Table, path: &Path, sheet_name: &str) -> Result<u64, BitextError> {
    if path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xls"))
    {
        return Err(BitextError::UnsupportedFormat(
            "legacy .xls output is not supported, use .xlsx".to_string(),
        ));
    }
    if table.row_count() > MAX_SHEET_ROWS {
        return Err(BitextError::TooManyRows {
            rows: table.row_count(),
            limit: MAX_SHEET_ROWS,
            target: "xlsx worksheet",
        });
    }
    if table.column_count() > MAX_SHEET_COLUMNS {
        return Err(BitextError::InvalidArgument(format!(
            "{} columns exceed the worksheet limit of {MAX_SHEET_COLUMNS}",
            table.column_count()
        )));
    }

    let written = fill_workbook(table, path, sheet_name);
    written.map_err(excel_err)?;
    Ok(table.row_count() as u64)
}

fn fill_workbook(table: &Table, path: &Path, sheet_name: &str) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (c, column) in table.columns.iter().enumerate() {
        worksheet.write_string(0, c as u16, column.name.as_str())?;
    }
    for (r, row) in table.rows.iter().enumerate() {
        let r = (r + 1) as u32;
        for (c, cell) in row.iter().enumerate() {
            let c = c as u16;
            match cell {
                CellValue::Text(s) => {
                    worksheet.write_string(r, c, s.as_str())?;
                }
                CellValue::Integer(v) => {
                    worksheet.write_number(r, c, *v as f64)?;
                }
                CellValue::Float(v) => {
                    worksheet.write_number(r, c, *v)?;
                }
                CellValue::Boolean(v) => {
                    worksheet.write_boolean(r, c, *v)?;
                }
                CellValue::Null => {}
            }
        }
    }

    workbook.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::with_rows(
            vec![
                Column::new("id", ColumnType::Integer),
                Column::text("nepali_col"),
                Column::text("english_col"),
            ],
            vec![
                vec![CellValue::Integer(1), "नमस्ते".into(), "Hello".into()],
                vec![CellValue::Integer(2), CellValue::Null, "Bye".into()],
            ],
        )
    }

    #[test]
    fn write_then_read_by_index_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.xlsx");
        assert_eq!(write_xlsx(&sample(), &path, "Pairs").unwrap(), 2);

        let by_index = read_xlsx(&path, &SheetSelector::Index(0)).unwrap();
        assert_eq!(by_index.column_names(), vec!["id", "nepali_col", "english_col"]);
        assert_eq!(by_index.row_count(), 2);
        assert_eq!(by_index.rows[0][1], CellValue::from("नमस्ते"));
        assert_eq!(by_index.rows[1][1], CellValue::Null);

        let by_name = read_xlsx(&path, &SheetSelector::Name("Pairs".into())).unwrap();
        assert_eq!(by_name.rows, by_index.rows);
    }

    #[test]
    fn missing_sheet_lists_available() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.xlsx");
        write_xlsx(&sample(), &path, "Sheet1").unwrap();

        let err = read_xlsx(&path, &SheetSelector::Name("Other".into())).unwrap_err();
        assert!(matches!(err, BitextError::MissingSource(_)));
        assert!(err.to_string().contains("Sheet1"));

        let err = read_xlsx(&path, &SheetSelector::Index(4)).unwrap_err();
        assert!(matches!(err, BitextError::MissingSource(_)));
    }

    #[test]
    fn rejects_legacy_xls_output() {
        let dir = tempfile::tempdir().unwrap();
        let err = write_xlsx(&sample(), &dir.path().join("out.xls"), "Sheet1").unwrap_err();
        assert!(matches!(err, BitextError::UnsupportedFormat(_)));
    }

    #[test]
    fn blank_header_gets_placeholder_name() {
        assert_eq!(header_name(2, Some(&Data::Empty)), "Unnamed: 2");
        assert_eq!(header_name(0, Some(&Data::String("id".into()))), "id");
        assert_eq!(header_name(5, None), "Unnamed: 5");
    }
}
