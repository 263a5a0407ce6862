//! End-to-end runs of the row filter pipeline over small tables.

use bitext_clean::{DedupPolicy, NonsenseThresholds, PipelineConfig, RowFilterPipeline};
use bitext_core::{CellValue, Column, ColumnType, Table};

fn greeting_table() -> Table {
    Table::with_rows(
        vec![
            Column::new("id", ColumnType::Integer),
            Column::text("nepali_col"),
            Column::text("english_col"),
        ],
        vec![
            vec![CellValue::Integer(1), "1. नमस्ते".into(), "1. Hello".into()],
            vec![CellValue::Integer(2), "नमस्ते".into(), "Hello".into()],
            vec![CellValue::Integer(3), "abc".into(), "xyz".into()],
        ],
    )
}

fn config(keep_first: bool) -> PipelineConfig {
    PipelineConfig::new("nepali_col", "english_col").with_dedup(DedupPolicy {
        case_insensitive: false,
        keep_first,
    })
}

#[test]
fn keep_order_leaves_first_greeting() {
    let (out, report) = RowFilterPipeline::new(config(true))
        .run(greeting_table())
        .unwrap();

    assert_eq!(out.row_count(), 1);
    assert_eq!(
        out.rows[0],
        vec![CellValue::Integer(1), "नमस्ते".into(), "Hello".into()]
    );
    assert_eq!(out.column_names(), vec!["id", "nepali_col", "english_col"]);
    assert_eq!(report.input_rows, 3);
    assert_eq!(report.dropped_latin, 1);
    assert_eq!(report.dropped_duplicates, 1);
    assert_eq!(report.output_rows, 1);
}

#[test]
fn strict_dedup_leaves_nothing() {
    let (out, report) = RowFilterPipeline::new(config(false))
        .run(greeting_table())
        .unwrap();

    assert!(out.is_empty());
    assert_eq!(report.dropped_latin, 1);
    assert_eq!(report.dropped_duplicates, 2);
    assert_eq!(out.column_count(), 3);
}

#[test]
fn messy_corpus_rows() {
    let table = Table::with_rows(
        vec![
            Column::text("source"),
            Column::text("nepali_col"),
            Column::text("english_col"),
        ],
        vec![
            // Zero-width marks, NBSP and a Devanagari numeral marker.
            vec![
                "web".into(),
                "\u{FEFF}१)\u{00A0}म घर\u{200B} जान्छु ।".into(),
                "  I go\nhome. ".into(),
            ],
            // Digits in the Nepali side become Devanagari digits.
            vec!["book".into(), "(2). म 5 वटा किताब पढ्छु".into(), "I read 5 books".into()],
            // Mostly symbols on the English side.
            vec!["web".into(), "ठीक छ".into(), "%%% ###".into()],
            // Quotes are outside the allowed set.
            vec!["web".into(), "\"ठीक छ\"".into(), "\"Okay\"".into()],
            // Missing English side.
            vec!["web".into(), "ठीक छ".into(), CellValue::Null],
        ],
    );

    let thresholds = NonsenseThresholds {
        min_alpha_ratio: 0.3,
        max_symbol_ratio: 0.5,
    };
    let cfg = PipelineConfig::new("nepali_col", "english_col").with_thresholds(thresholds);
    let (out, report) = RowFilterPipeline::new(cfg).run(table).unwrap();

    assert_eq!(report.dropped_blank, 1);
    assert_eq!(report.dropped_nonsense, 1);
    assert_eq!(report.dropped_disallowed, 1);
    assert_eq!(out.row_count(), 2);

    assert_eq!(out.rows[0][0], CellValue::from("web"));
    assert_eq!(out.rows[0][1], CellValue::from("म घर जान्छु ।"));
    assert_eq!(out.rows[0][2], CellValue::from("I go home."));

    assert_eq!(out.rows[1][1], CellValue::from("म ५ वटा किताब पढ्छु"));
    assert_eq!(out.rows[1][2], CellValue::from("I read 5 books"));
}
