use std::path::PathBuf;

use bitext_tabular::{ParquetCompression, SheetSelector, TableFormat};
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Clean Nepali/English sentence-pair tables and re-chunk large datasets.
///
/// Defaults for every optional flag come from the environment (see
/// `BITEXT_PROFILE` and `.env`); flags given on the command line win.
#[derive(Parser, Debug)]
#[command(name = "bitext", version, about)]
pub struct Cli {
    /// Config profile; keys are looked up as {PROFILE}_{KEY} first.
    #[arg(long, env = "BITEXT_PROFILE", global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Normalize, filter and deduplicate a sentence-pair table.
    Clean(CleanArgs),
    /// Write a table in full and as fixed-size chunk files.
    Export(ExportArgs),
    /// Split a Parquet file into smaller Parquet files by row count.
    Split(SplitArgs),
}

/// Designated column holding Devanagari text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScriptColumnArg {
    Nepali,
    English,
}

#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Input table (.csv, .xlsx or .parquet)
    #[arg(long)]
    pub infile: PathBuf,

    /// Output table; format follows the extension
    #[arg(long)]
    pub outfile: PathBuf,

    /// Worksheet name or zero-based index for workbook inputs
    #[arg(long, default_value = "0")]
    pub sheet: SheetSelector,

    #[arg(long)]
    pub nepali_col: Option<String>,

    #[arg(long)]
    pub english_col: Option<String>,

    /// Column that gets digit conversion and the script checks
    #[arg(long, value_enum, default_value_t = ScriptColumnArg::Nepali)]
    pub script_col: ScriptColumnArg,

    /// Compare pairs ignoring case when looking for duplicates
    #[arg(long)]
    pub case_insensitive_dupes: bool,

    /// Keep the first of each duplicate group. Without it every copy is dropped.
    #[arg(long)]
    pub keep_order: bool,

    /// Minimum letter ratio before a value counts as nonsense
    #[arg(long)]
    pub min_alpha_ratio: Option<f64>,

    /// Maximum punctuation/symbol ratio allowed
    #[arg(long)]
    pub max_symbol_ratio: Option<f64>,

    /// Leave leading list markers in place
    #[arg(long)]
    pub no_bullets: bool,

    /// Leave ASCII digits unconverted
    #[arg(long)]
    pub no_digits: bool,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Input table, Parquet file or Parquet dataset directory
    #[arg(long = "in")]
    pub in_path: PathBuf,

    /// Output path for the full dataset
    #[arg(long)]
    pub out_file: PathBuf,

    /// Directory for the chunk files
    #[arg(long)]
    pub split_dir: PathBuf,

    #[arg(long, default_value = "sentences")]
    pub base_name: String,

    /// Rows per chunk file
    #[arg(long)]
    pub chunk_size: Option<usize>,

    /// Keep only these columns, in this order
    #[arg(long, num_args = 1..)]
    pub columns: Option<Vec<String>>,

    /// Worksheet name for workbook outputs
    #[arg(long)]
    pub sheet: Option<String>,

    /// Format of the chunk files
    #[arg(long, default_value = "xlsx")]
    pub split_format: TableFormat,
}

#[derive(Args, Debug)]
pub struct SplitArgs {
    /// Input .parquet file
    #[arg(long = "in")]
    pub in_path: PathBuf,

    #[arg(long)]
    pub out_dir: PathBuf,

    #[arg(long, default_value = "part")]
    pub base_name: String,

    #[arg(long)]
    pub rows_per_file: Option<usize>,

    #[arg(long)]
    pub read_batch_rows: Option<usize>,

    #[arg(long)]
    pub write_row_group_rows: Option<usize>,

    /// snappy, gzip, zstd or none
    #[arg(long)]
    pub compression: Option<ParquetCompression>,
}
