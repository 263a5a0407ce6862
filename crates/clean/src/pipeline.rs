//! Sequential row filters over a sentence-pair table.
//!
//! Pass order: prepare the designated columns (normalize, strip markers,
//! convert digits), then drop blank rows, mixed-script rows, nonsense rows,
//! rows with disallowed characters, and finally duplicates. Passes only
//! remove rows; cells outside the two designated columns are never touched.

use bitext_core::{BitextError, CellValue, ColumnType, Table};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::bullets::strip_bullets_cell;
use crate::dedup::{dedup_key, retain_mask, DedupPolicy};
use crate::digits::to_devanagari_digits_cell;
use crate::nonsense::{looks_nonsense, CharProfile, NonsenseThresholds};
use crate::normalize::normalize_cell;
use crate::script::{contains_latin, is_allowed_devanagari};

/// Which designated column carries the Devanagari side. That column gets
/// digit conversion, the Latin-letter check and the allow-list check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScriptColumn {
    #[default]
    Source,
    Target,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub source_column: String,
    pub target_column: String,
    pub script_column: ScriptColumn,
    pub thresholds: NonsenseThresholds,
    pub dedup: DedupPolicy,
    /// Remove leading list markers from both designated columns.
    pub strip_bullets: bool,
    /// Convert ASCII digits in the script column to Devanagari digits.
    pub convert_digits: bool,
}

impl PipelineConfig {
    pub fn new(source_column: impl Into<String>, target_column: impl Into<String>) -> Self {
        Self {
            source_column: source_column.into(),
            target_column: target_column.into(),
            script_column: ScriptColumn::default(),
            thresholds: NonsenseThresholds::default(),
            dedup: DedupPolicy::default(),
            strip_bullets: true,
            convert_digits: true,
        }
    }

    pub fn with_script_column(mut self, script_column: ScriptColumn) -> Self {
        self.script_column = script_column;
        self
    }

    pub fn with_thresholds(mut self, thresholds: NonsenseThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_dedup(mut self, dedup: DedupPolicy) -> Self {
        self.dedup = dedup;
        self
    }
}

/// Row counts removed by each pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterReport {
    pub input_rows: usize,
    pub dropped_blank: usize,
    pub dropped_latin: usize,
    pub dropped_nonsense: usize,
    pub dropped_disallowed: usize,
    pub dropped_duplicates: usize,
    pub output_rows: usize,
}

impl FilterReport {
    pub fn total_dropped(&self) -> usize {
        self.dropped_blank
            + self.dropped_latin
            + self.dropped_nonsense
            + self.dropped_disallowed
            + self.dropped_duplicates
    }
}

pub struct RowFilterPipeline {
    config: PipelineConfig,
}

fn text(row: &[CellValue], idx: usize) -> &str {
    row[idx].as_str().unwrap_or("")
}

fn is_nonsense(text: &str, thresholds: &NonsenseThresholds) -> bool {
    if !looks_nonsense(text, thresholds) {
        return false;
    }
    let profile = CharProfile::of(text);
    debug!(
        total = profile.total,
        letters = profile.letters,
        symbols = profile.symbols,
        "Dropping nonsense row"
    );
    true
}

impl RowFilterPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Normalize, strip markers and (for the script column) convert digits.
    fn prepare(&self, cell: &CellValue, is_script: bool) -> CellValue {
        let mut value = CellValue::Text(normalize_cell(cell));
        if self.config.strip_bullets {
            value = strip_bullets_cell(&value);
        }
        if is_script && self.config.convert_digits {
            value = to_devanagari_digits_cell(&value);
        }
        value
    }

    /// Run every pass. Fails only when a designated column is missing; an
    /// empty result is a normal outcome.
    pub fn run(&self, mut table: Table) -> Result<(Table, FilterReport), BitextError> {
        let src = table.require_column(&self.config.source_column)?;
        let tgt = table.require_column(&self.config.target_column)?;
        let (script, other) = match self.config.script_column {
            ScriptColumn::Source => (src, tgt),
            ScriptColumn::Target => (tgt, src),
        };

        let mut report = FilterReport {
            input_rows: table.row_count(),
            ..Default::default()
        };

        for row in &mut table.rows {
            let other_value = self.prepare(&row[other], false);
            let script_value = self.prepare(&row[script], true);
            row[other] = other_value;
            row[script] = script_value;
        }
        table.columns[src].column_type = ColumnType::Text;
        table.columns[tgt].column_type = ColumnType::Text;
        debug!(rows = table.row_count(), "Prepared designated columns");

        report.dropped_blank = table.retain_rows(|row| {
            !text(row, src).trim().is_empty() && !text(row, tgt).trim().is_empty()
        });

        report.dropped_latin = table.retain_rows(|row| !contains_latin(text(row, script)));

        let thresholds = self.config.thresholds;
        report.dropped_nonsense = table.retain_rows(|row| {
            !is_nonsense(text(row, src), &thresholds) && !is_nonsense(text(row, tgt), &thresholds)
        });

        report.dropped_disallowed =
            table.retain_rows(|row| is_allowed_devanagari(text(row, script)));

        report.dropped_duplicates = self.dedup(&mut table, src, tgt);
        report.output_rows = table.row_count();

        info!(
            input = report.input_rows,
            blank = report.dropped_blank,
            latin = report.dropped_latin,
            nonsense = report.dropped_nonsense,
            disallowed = report.dropped_disallowed,
            duplicates = report.dropped_duplicates,
            output = report.output_rows,
            "Filter pipeline complete"
        );

        Ok((table, report))
    }

    fn dedup(&self, table: &mut Table, src: usize, tgt: usize) -> usize {
        let policy: DedupPolicy = self.config.dedup;
        let keys: Vec<String> = table
            .rows
            .iter()
            .map(|row| dedup_key(text(row, src), text(row, tgt), policy.case_insensitive))
            .collect();
        let mask = retain_mask(&keys, policy);
        let dropped = mask.iter().filter(|keep| !**keep).count();
        table.retain_mask(&mask);

        if dropped > 0 && !policy.keep_first {
            warn!(
                dropped,
                "Strict de-duplication removed every member of repeated pairs; \
                 use keep-order to retain the first"
            );
        }
        dropped
    }
}
