//! Row-level cleaning for Nepali/English sentence-pair tables.
//!
//! Each module is one pass: text normalization, leading-marker stripping,
//! digit-script conversion, the nonsense heuristic, script checks and
//! duplicate elimination. [`pipeline::RowFilterPipeline`] composes them over
//! a whole [`bitext_core::Table`].

pub mod bullets;
pub mod dedup;
pub mod digits;
pub mod nonsense;
pub mod normalize;
pub mod pipeline;
pub mod script;

pub use bullets::{strip_bullets, MarkerKind, MAX_STRIP_PASSES};
pub use dedup::{dedup_key, DedupPolicy, DEDUP_KEY_SEPARATOR};
pub use digits::to_devanagari_digits;
pub use nonsense::{looks_nonsense, NonsenseThresholds};
pub use normalize::{normalize_cell, normalize_text};
pub use pipeline::{FilterReport, PipelineConfig, RowFilterPipeline, ScriptColumn};
pub use script::{contains_latin, is_allowed_devanagari};
