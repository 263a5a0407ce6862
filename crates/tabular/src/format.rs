use std::fmt;
use std::path::Path;
use std::str::FromStr;

use bitext_core::BitextError;
use serde::{Deserialize, Serialize};

/// On-disk table formats understood by the reader and writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableFormat {
    Csv,
    Xlsx,
    Parquet,
}

impl TableFormat {
    /// Detect the format from a file extension. A directory is read as a
    /// Parquet dataset.
    pub fn from_path(path: &Path) -> Result<Self, BitextError> {
        if path.is_dir() {
            return Ok(TableFormat::Parquet);
        }
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(TableFormat::Csv),
            "xlsx" | "xlsm" | "xls" => Ok(TableFormat::Xlsx),
            "parquet" | "pq" => Ok(TableFormat::Parquet),
            _ => Err(BitextError::UnsupportedFormat(format!(
                "{} (expected .csv, .xlsx or .parquet)",
                path.display()
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Xlsx => "xlsx",
            TableFormat::Parquet => "parquet",
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for TableFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(TableFormat::Csv),
            "xlsx" | "excel" => Ok(TableFormat::Xlsx),
            "parquet" => Ok(TableFormat::Parquet),
            other => Err(format!("unknown table format '{other}' (csv, xlsx, parquet)")),
        }
    }
}

/// Worksheet to read from a workbook: by zero-based position or by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SheetSelector {
    Index(usize),
    Name(String),
}

impl Default for SheetSelector {
    fn default() -> Self {
        SheetSelector::Index(0)
    }
}

impl fmt::Display for SheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetSelector::Index(i) => write!(f, "#{i}"),
            SheetSelector::Name(name) => write!(f, "'{name}'"),
        }
    }
}

impl FromStr for SheetSelector {
    type Err = String;

    /// All-digit input selects by position, anything else by name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("sheet selector must not be empty".to_string());
        }
        match s.parse::<usize>() {
            Ok(i) if s.chars().all(|c| c.is_ascii_digit()) => Ok(SheetSelector::Index(i)),
            _ => Ok(SheetSelector::Name(s.to_string())),
        }
    }
}
