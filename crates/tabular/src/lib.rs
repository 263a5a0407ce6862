//! Tabular collaborators for the cleaning tools: read and write CSV, XLSX
//! and Parquet tables, export a table in fixed-size chunks, and split large
//! Parquet files without loading them whole.

pub mod chunk;
pub mod csv_io;
pub mod format;
pub mod parquet_io;
pub mod reader;
pub mod split;
pub mod writer;
pub mod xlsx;

pub use chunk::{chunk_file_name, chunk_ranges, export_chunks, ChunkOptions, ChunkPart};
pub use format::{SheetSelector, TableFormat};
pub use reader::{project, read_table, ReadOptions};
pub use split::{
    plan_parts, split_parquet, split_part_name, RowGroupBatches, SplitOptions, SplitPart,
};
pub use writer::{write_table, write_table_as, ParquetCompression, WriteOptions};
