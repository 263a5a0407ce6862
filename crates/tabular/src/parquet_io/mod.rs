//! Typed Parquet reading and writing for [`Table`](bitext_core::Table).
//!
//! Text, integer, float and boolean columns map to Utf8, Int64, Float64 and
//! Boolean Arrow arrays. On read, any other Arrow type is rendered as text
//! so that nothing in the file is silently dropped.

mod builders;
mod convert;
mod error;
mod reader;
pub(crate) mod schema;
mod writer;


pub use convert::batch_to_rows;
pub use error::ParquetIoError;
pub use reader::{list_dataset_files, read_parquet};
pub use schema::{arrow_to_column_type, build_schema, column_type_to_arrow};
pub use writer::{
    table_to_record_batch, write_parquet, writer_properties, ParquetCompression,
};
