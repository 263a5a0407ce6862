//! Split a large Parquet file into smaller ones without loading it whole.
//!
//! The input is read one row group at a time in batches of at most
//! `read_batch_rows` rows. Batches are grouped into output files of at most
//! `rows_per_file` rows and are never cut in two, so the batch size is
//! capped at `rows_per_file`.

use std::convert::Infallible;
use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use bitext_core::BitextError;
use parquet::arrow::arrow_reader::{ParquetRecordBatchReader, ParquetRecordBatchReaderBuilder};
use parquet::arrow::ArrowWriter;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::parquet_io::{writer_properties, ParquetCompression, ParquetIoError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitOptions {
    pub base_name: String,
    pub rows_per_file: usize,
    pub read_batch_rows: usize,
    pub write_row_group_rows: usize,
    pub compression: ParquetCompression,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            base_name: "part".to_string(),
            rows_per_file: 200_000,
            read_batch_rows: 100_000,
            write_row_group_rows: 100_000,
            compression: ParquetCompression::Snappy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitPart {
    /// 1-based.
    pub index: usize,
    pub path: PathBuf,
    pub rows: usize,
    pub batches: usize,
}

// ── Batch source ──────────────────────────────────────────────

/// Record batches of a Parquet file, read one row group at a time in
/// row-group order. Only the current row group's reader is kept open.
///
/// The iterator is finite and stops after the first error.
pub struct RowGroupBatches {
    path: PathBuf,
    schema: SchemaRef,
    batch_rows: usize,
    num_row_groups: usize,
    next_row_group: usize,
    current: Option<ParquetRecordBatchReader>,
}

impl RowGroupBatches {
    pub fn open(path: &Path, batch_rows: usize) -> Result<Self, BitextError> {
        if !path.is_file() {
            return Err(BitextError::MissingSource(path.display().to_string()));
        }
        if batch_rows == 0 {
            return Err(BitextError::InvalidArgument(
                "read batch size must be greater than zero".to_string(),
            ));
        }
        let file = File::open(path)?;
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(ParquetIoError::from)?;

        Ok(Self {
            path: path.to_path_buf(),
            schema: builder.schema().clone(),
            batch_rows,
            num_row_groups: builder.metadata().num_row_groups(),
            next_row_group: 0,
            current: None,
        })
    }

    pub fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    pub fn num_row_groups(&self) -> usize {
        self.num_row_groups
    }

    fn open_row_group(&self, row_group: usize) -> Result<ParquetRecordBatchReader, BitextError> {
        let file = File::open(&self.path)?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)
            .and_then(|b| {
                b.with_row_groups(vec![row_group])
                    .with_batch_size(self.batch_rows)
                    .build()
            })
            .map_err(ParquetIoError::from)?;
        Ok(reader)
    }

    fn stop(&mut self) {
        self.current = None;
        self.next_row_group = self.num_row_groups;
    }
}

impl Iterator for RowGroupBatches {
    type Item = Result<RecordBatch, BitextError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(reader) = self.current.as_mut() {
                match reader.next() {
                    Some(Ok(batch)) => return Some(Ok(batch)),
                    Some(Err(e)) => {
                        self.stop();
                        return Some(Err(ParquetIoError::from(e).into()));
                    }
                    None => self.current = None,
                }
            }

            if self.next_row_group >= self.num_row_groups {
                return None;
            }
            let row_group = self.next_row_group;
            self.next_row_group += 1;
            match self.open_row_group(row_group) {
                Ok(reader) => self.current = Some(reader),
                Err(e) => {
                    self.stop();
                    return Some(Err(e));
                }
            }
        }
    }
}

// ── Grouping ──────────────────────────────────────────────────

/// Groups sized items into parts of at most `limit` rows. A part is flushed
/// before an item that would overflow it and as soon as it reaches `limit`.
struct PartAccumulator<T> {
    limit: usize,
    items: Vec<T>,
    rows: usize,
}

impl<T> PartAccumulator<T> {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            items: Vec::new(),
            rows: 0,
        }
    }

    fn push<E>(
        &mut self,
        item: T,
        rows: usize,
        flush: &mut impl FnMut(Vec<T>, usize) -> Result<(), E>,
    ) -> Result<(), E> {
        if self.rows > 0 && self.rows + rows > self.limit {
            self.flush(flush)?;
        }
        self.items.push(item);
        self.rows += rows;
        if self.rows >= self.limit {
            self.flush(flush)?;
        }
        Ok(())
    }

    fn finish<E>(
        mut self,
        flush: &mut impl FnMut(Vec<T>, usize) -> Result<(), E>,
    ) -> Result<(), E> {
        if self.rows > 0 {
            self.flush(flush)?;
        }
        Ok(())
    }

    fn flush<E>(
        &mut self,
        flush: &mut impl FnMut(Vec<T>, usize) -> Result<(), E>,
    ) -> Result<(), E> {
        let items = std::mem::take(&mut self.items);
        let rows = std::mem::replace(&mut self.rows, 0);
        flush(items, rows)
    }
}

/// Group batch sizes the way [`split_parquet`] groups batches into files.
pub fn plan_parts(batch_sizes: &[usize], rows_per_file: usize) -> Vec<Vec<usize>> {
    let mut parts = Vec::new();
    let mut record = |items: Vec<usize>, _rows: usize| -> Result<(), Infallible> {
        parts.push(items);
        Ok(())
    };
    let mut acc = PartAccumulator::new(rows_per_file);
    for &size in batch_sizes {
        if let Err(never) = acc.push(size, size, &mut record) {
            match never {}
        }
    }
    if let Err(never) = acc.finish(&mut record) {
        match never {}
    }
    parts
}

// ── Splitter ──────────────────────────────────────────────────

pub fn split_part_name(base_name: &str, index: usize) -> String {
    format!("{base_name}_{index:03}.parquet")
}

/// Stream `in_path` into `{base}_{NNN}.parquet` files under `out_dir`.
pub fn split_parquet(
    in_path: &Path,
    out_dir: &Path,
    opts: &SplitOptions,
) -> Result<Vec<SplitPart>, BitextError> {
    if opts.rows_per_file == 0 {
        return Err(BitextError::InvalidArgument(
            "rows per file must be greater than zero".to_string(),
        ));
    }
    let batch_rows = opts.read_batch_rows.min(opts.rows_per_file);
    let batches = RowGroupBatches::open(in_path, batch_rows)?;
    let schema = batches.schema();
    std::fs::create_dir_all(out_dir)?;

    info!(
        input = %in_path.display(),
        row_groups = batches.num_row_groups(),
        rows_per_file = opts.rows_per_file,
        batch_rows,
        "Splitting Parquet file"
    );

    let mut parts: Vec<SplitPart> = Vec::new();
    let mut write_part = |batches: Vec<RecordBatch>, rows: usize| -> Result<(), BitextError> {
        let index = parts.len() + 1;
        let path = out_dir.join(split_part_name(&opts.base_name, index));
        write_batches(&path, schema.clone(), &batches, opts)?;
        debug!(part = index, rows, batches = batches.len(), path = %path.display(), "Wrote part");
        parts.push(SplitPart {
            index,
            path,
            rows,
            batches: batches.len(),
        });
        Ok(())
    };

    let mut acc = PartAccumulator::new(opts.rows_per_file);
    for batch in batches {
        let batch = batch?;
        let rows = batch.num_rows();
        if rows == 0 {
            continue;
        }
        acc.push(batch, rows, &mut write_part)?;
    }
    acc.finish(&mut write_part)?;

    let total: usize = parts.iter().map(|p| p.rows).sum();
    info!("Split {} rows into {} files in {}", total, parts.len(), out_dir.display());
    Ok(parts)
}

fn write_batches(
    path: &Path,
    schema: SchemaRef,
    batches: &[RecordBatch],
    opts: &SplitOptions,
) -> Result<(), BitextError> {
    let file = File::create(path)?;
    let props = writer_properties(opts.compression, opts.write_row_group_rows);
    let mut writer = ArrowWriter::try_new(file, schema, Some(props)).map_err(ParquetIoError::from)?;
    for batch in batches {
        writer.write(batch).map_err(ParquetIoError::from)?;
    }
    writer.close().map_err(ParquetIoError::from)?;
    Ok(())
}
