use thiserror::Error;

#[derive(Error, Debug)]
pub enum BitextError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Excel error: {0}")]
    Excel(String),

    #[error("Parquet error: {0}")]
    Parquet(String),

    #[error("Arrow error: {0}")]
    Arrow(String),

    /// Input path or sheet does not exist.
    #[error("missing source: {0}")]
    MissingSource(String),

    /// A required column is absent from the loaded table.
    #[error("column '{column}' not found. Available: {available:?}")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("unsupported table format: {0}")]
    UnsupportedFormat(String),

    #[error("table has {rows} rows, more than the {limit} a single {target} can hold")]
    TooManyRows {
        rows: usize,
        limit: usize,
        target: &'static str,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T, E = BitextError> = std::result::Result<T, E>;
