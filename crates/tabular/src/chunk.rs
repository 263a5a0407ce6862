//! Fixed-size chunked export of a table.

use std::ops::Range;
use std::path::{Path, PathBuf};

use bitext_core::{BitextError, Table};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::format::TableFormat;
use crate::writer::{write_table_as, WriteOptions};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkOptions {
    /// Maximum rows per part. Must be positive.
    pub chunk_size: usize,
    pub base_name: String,
    pub format: TableFormat,
    pub write: WriteOptions,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            chunk_size: 20_000,
            base_name: "sentences".to_string(),
            format: TableFormat::Xlsx,
            write: WriteOptions::default(),
        }
    }
}

/// One written part. Row numbers are 1-based and inclusive, matching the
/// range in the file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkPart {
    pub index: usize,
    pub first_row: usize,
    pub last_row: usize,
    pub path: PathBuf,
}

impl ChunkPart {
    pub fn rows(&self) -> usize {
        self.last_row + 1 - self.first_row
    }
}

/// Contiguous row windows of at most `chunk_size` rows covering
/// `0..total_rows` in order. A zero chunk size yields no windows.
pub fn chunk_ranges(total_rows: usize, chunk_size: usize) -> Vec<Range<usize>> {
    if chunk_size == 0 {
        return Vec::new();
    }
    (0..total_rows)
        .step_by(chunk_size)
        .map(|start| start..(start + chunk_size).min(total_rows))
        .collect()
}

/// `{base}_part{NNN}_{first}-{last}.{ext}` with a 1-based part index.
pub fn chunk_file_name(
    base_name: &str,
    index: usize,
    rows: &Range<usize>,
    format: TableFormat,
) -> String {
    format!(
        "{}_part{:03}_{}-{}.{}",
        base_name,
        index,
        rows.start + 1,
        rows.end,
        format.extension()
    )
}

/// Write `table` into `out_dir` as consecutive parts of at most
/// `opts.chunk_size` rows. The directory is created even when the table is
/// empty, in which case no parts are written.
pub fn export_chunks(
    table: &Table,
    out_dir: &Path,
    opts: &ChunkOptions,
) -> Result<Vec<ChunkPart>, BitextError> {
    if opts.chunk_size == 0 {
        return Err(BitextError::InvalidArgument(
            "chunk size must be greater than zero".to_string(),
        ));
    }
    std::fs::create_dir_all(out_dir)?;

    let ranges = chunk_ranges(table.row_count(), opts.chunk_size);
    let mut parts = Vec::with_capacity(ranges.len());

    for (i, range) in ranges.into_iter().enumerate() {
        let index = i + 1;
        let path = out_dir.join(chunk_file_name(&opts.base_name, index, &range, opts.format));
        let chunk = table.slice(range.clone());
        write_table_as(&chunk, &path, opts.format, &opts.write)?;

        debug!(part = index, rows = chunk.row_count(), path = %path.display(), "Wrote chunk");
        parts.push(ChunkPart {
            index,
            first_row: range.start + 1,
            last_row: range.end,
            path,
        });
    }

    info!(
        "Exported {} rows as {} {} parts to {}",
        table.row_count(),
        parts.len(),
        opts.format,
        out_dir.display()
    );
    Ok(parts)
}
