use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::BitextError;

/// Typed cell values. Spreadsheet and Parquet sources keep their native
/// types; CSV sources arrive as text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl CellValue {
    /// Extract as string, returning None for anything that is not text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Render any value as text. Null becomes the empty string.
    pub fn to_text_lossy(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Integer(v) => v.to_string(),
            CellValue::Float(v) => v.to_string(),
            CellValue::Boolean(v) => v.to_string(),
            CellValue::Null => String::new(),
        }
    }

    fn kind(&self) -> Option<ColumnType> {
        match self {
            CellValue::Text(_) => Some(ColumnType::Text),
            CellValue::Integer(_) => Some(ColumnType::Integer),
            CellValue::Float(_) => Some(ColumnType::Float),
            CellValue::Boolean(_) => Some(ColumnType::Boolean),
            CellValue::Null => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Integer(v)
    }
}

/// Logical type of a column, used when writing typed outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Text,
    Integer,
    Float,
    Boolean,
}

impl ColumnType {
    /// The single type shared by every non-null value, or `Text` when the
    /// values disagree or are all null.
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a CellValue>) -> Self {
        let mut seen: Option<ColumnType> = None;
        for kind in values.into_iter().filter_map(CellValue::kind) {
            match seen {
                None => seen = Some(kind),
                Some(prev) if prev == kind => {}
                Some(ColumnType::Integer) if kind == ColumnType::Float => {
                    seen = Some(ColumnType::Float)
                }
                Some(ColumnType::Float) if kind == ColumnType::Integer => {}
                Some(_) => return ColumnType::Text,
            }
        }
        seen.unwrap_or(ColumnType::Text)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Text => write!(f, "text"),
            ColumnType::Integer => write!(f, "integer"),
            ColumnType::Float => write!(f, "float"),
            ColumnType::Boolean => write!(f, "boolean"),
        }
    }
}

/// Column definition in table order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, ColumnType::Text)
    }
}

/// An ordered sequence of rows sharing a fixed column schema.
///
/// Each inner vector has the same length as `columns`, and column order is
/// preserved by every operation that returns a new table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn with_rows(columns: Vec<Column>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Zero-based index of a column by name (case-sensitive).
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Like [`Table::column_index`] but reports the available columns when
    /// the name is unknown.
    pub fn require_column(&self, name: &str) -> Result<usize, BitextError> {
        self.column_index(name)
            .ok_or_else(|| BitextError::MissingColumn {
                column: name.to_string(),
                available: self.column_names(),
            })
    }

    /// Copy of a contiguous window of rows. Out-of-range bounds are clamped.
    pub fn slice(&self, range: Range<usize>) -> Table {
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        Table {
            columns: self.columns.clone(),
            rows: self.rows[start..end].to_vec(),
        }
    }

    /// Keep only rows whose flag is `true`. `keep` must have one entry per row.
    pub fn retain_mask(&mut self, keep: &[bool]) {
        debug_assert_eq!(keep.len(), self.rows.len());
        let mut flags = keep.iter();
        self.rows.retain(|_| flags.next().copied().unwrap_or(false));
    }

    /// Keep only rows matching the predicate, returning how many were dropped.
    pub fn retain_rows<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&[CellValue]) -> bool,
    {
        let before = self.rows.len();
        self.rows.retain(|row| predicate(row));
        before - self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::with_rows(
            vec![
                Column::new("id", ColumnType::Integer),
                Column::text("nepali_col"),
                Column::text("english_col"),
            ],
            vec![
                vec![CellValue::Integer(1), "नमस्ते".into(), "Hello".into()],
                vec![CellValue::Integer(2), CellValue::Null, "Bye".into()],
                vec![CellValue::Integer(3), "धन्यवाद".into(), CellValue::Null],
            ],
        )
    }

    #[test]
    fn test_accessors() {
        let t = sample_table();
        assert_eq!(t.row_count(), 3);
        assert_eq!(t.column_count(), 3);
        assert!(!t.is_empty());
        assert_eq!(t.column_index("english_col"), Some(2));
        assert_eq!(t.column_index("missing"), None);
        assert_eq!(t.column_names(), vec!["id", "nepali_col", "english_col"]);
    }

    #[test]
    fn test_require_column_reports_available() {
        let t = sample_table();
        assert_eq!(t.require_column("id").unwrap(), 0);
        match t.require_column("nope") {
            Err(BitextError::MissingColumn { column, available }) => {
                assert_eq!(column, "nope");
                assert_eq!(available, vec!["id", "nepali_col", "english_col"]);
            }
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_slice_clamps() {
        let t = sample_table();
        let s = t.slice(1..10);
        assert_eq!(s.row_count(), 2);
        assert_eq!(s.columns, t.columns);
        assert_eq!(s.rows[0][0], CellValue::Integer(2));
        assert!(t.slice(5..9).is_empty());
    }

    #[test]
    fn test_retain_mask_and_rows() {
        let mut t = sample_table();
        t.retain_mask(&[true, false, true]);
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.rows[1][0], CellValue::Integer(3));

        let dropped = t.retain_rows(|row| !row.iter().any(CellValue::is_null));
        assert_eq!(dropped, 1);
        assert_eq!(t.row_count(), 1);
    }

    #[test]
    fn test_to_text_lossy() {
        assert_eq!(CellValue::Integer(42).to_text_lossy(), "42");
        assert_eq!(CellValue::Float(1.5).to_text_lossy(), "1.5");
        assert_eq!(CellValue::Boolean(true).to_text_lossy(), "true");
        assert_eq!(CellValue::Null.to_text_lossy(), "");
        assert_eq!(CellValue::Integer(7).as_str(), None);
    }

    #[test]
    fn test_column_type_infer() {
        let ints = [CellValue::Integer(1), CellValue::Null, CellValue::Integer(3)];
        assert_eq!(ColumnType::infer(&ints), ColumnType::Integer);

        let mixed_numbers = [CellValue::Integer(1), CellValue::Float(2.5)];
        assert_eq!(ColumnType::infer(&mixed_numbers), ColumnType::Float);

        let mixed = [CellValue::Integer(1), CellValue::from("x")];
        assert_eq!(ColumnType::infer(&mixed), ColumnType::Text);

        let nulls = [CellValue::Null, CellValue::Null];
        assert_eq!(ColumnType::infer(&nulls), ColumnType::Text);
    }
}
