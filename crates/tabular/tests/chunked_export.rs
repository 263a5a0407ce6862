//! Chunked export over every output format.

use bitext_core::{CellValue, Column, ColumnType, Table};
use bitext_tabular::{
    export_chunks, read_table, ChunkOptions, ReadOptions, TableFormat, WriteOptions,
};

fn numbered_table(rows: usize) -> Table {
    Table::with_rows(
        vec![Column::new("id", ColumnType::Integer), Column::text("nepali_col")],
        (1..=rows)
            .map(|i| vec![CellValue::Integer(i as i64), CellValue::Text(format!("वाक्य {i}"))])
            .collect(),
    )
}

fn options(format: TableFormat) -> ChunkOptions {
    ChunkOptions {
        chunk_size: 20,
        base_name: "sentences".to_string(),
        format,
        write: WriteOptions::default(),
    }
}

#[test]
fn forty_five_rows_make_three_parts() {
    let dir = tempfile::tempdir().unwrap();
    let parts =
        export_chunks(&numbered_table(45), dir.path(), &options(TableFormat::Xlsx)).unwrap();

    let sizes: Vec<usize> = parts.iter().map(|p| p.rows()).collect();
    assert_eq!(sizes, vec![20, 20, 5]);

    let names: Vec<String> = parts
        .iter()
        .map(|p| p.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "sentences_part001_1-20.xlsx",
            "sentences_part002_21-40.xlsx",
            "sentences_part003_41-45.xlsx",
        ]
    );
    assert_eq!((parts[2].first_row, parts[2].last_row), (41, 45));

    let last = read_table(&parts[2].path, &ReadOptions::default()).unwrap();
    assert_eq!(last.row_count(), 5);
    assert_eq!(last.column_names(), vec!["id", "nepali_col"]);
    assert_eq!(last.rows[0][1], CellValue::from("वाक्य 41"));
}

#[test]
fn empty_table_writes_no_parts_but_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("splits");
    let parts = export_chunks(&numbered_table(0), &out, &options(TableFormat::Xlsx)).unwrap();
    assert!(parts.is_empty());
    assert!(out.is_dir());
    assert_eq!(std::fs::read_dir(&out).unwrap().count(), 0);
}

#[test]
fn parts_concatenate_back_to_the_input() {
    let dir = tempfile::tempdir().unwrap();
    let table = numbered_table(45);

    for format in [TableFormat::Csv, TableFormat::Parquet] {
        let out = dir.path().join(format.extension());
        let parts = export_chunks(&table, &out, &options(format)).unwrap();
        assert_eq!(parts.len(), 3);

        let mut texts = Vec::new();
        for part in &parts {
            assert_eq!(part.path.extension().unwrap(), format.extension());
            let back = read_table(&part.path, &ReadOptions::default()).unwrap();
            texts.extend(back.rows.into_iter().map(|r| r[1].clone()));
        }
        let expected: Vec<CellValue> = table.rows.iter().map(|r| r[1].clone()).collect();
        assert_eq!(texts, expected, "format {format}");
    }
}
