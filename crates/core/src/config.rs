use std::env;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_f64(profile: &str, key: &str, default: f64) -> f64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub clean: CleanConfig,
    pub export: ExportConfig,
    pub split: SplitConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `BITEXT_PROFILE`. When set (e.g. `PROD`), every
    /// key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("BITEXT_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            clean: CleanConfig::from_env_profiled(p),
            export: ExportConfig::from_env_profiled(p),
            split: SplitConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  clean:   columns={}/{}, min_alpha_ratio={}, max_symbol_ratio={}",
            self.clean.nepali_column,
            self.clean.english_column,
            self.clean.min_alpha_ratio,
            self.clean.max_symbol_ratio
        );
        tracing::info!(
            "  export:  chunk_size={}, sheet={}",
            self.export.chunk_size,
            self.export.sheet_name
        );
        tracing::info!(
            "  split:   rows_per_file={}, read_batch_rows={}, row_group_rows={}, compression={}",
            self.split.rows_per_file,
            self.split.read_batch_rows,
            self.split.write_row_group_rows,
            self.split.compression
        );
    }
}

// ── Clean ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanConfig {
    pub nepali_column: String,
    pub english_column: String,
    pub min_alpha_ratio: f64,
    pub max_symbol_ratio: f64,
}

impl CleanConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            nepali_column: profiled_env_or(p, "NEPALI_COL", "nepali_col"),
            english_column: profiled_env_or(p, "ENGLISH_COL", "english_col"),
            min_alpha_ratio: profiled_env_f64(p, "MIN_ALPHA_RATIO", 0.3),
            max_symbol_ratio: profiled_env_f64(p, "MAX_SYMBOL_RATIO", 0.5),
        }
    }
}

// ── Export ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Rows per chunked export file.
    pub chunk_size: usize,
    pub sheet_name: String,
}

impl ExportConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            chunk_size: profiled_env_usize(p, "EXPORT_CHUNK_SIZE", 20_000),
            sheet_name: profiled_env_or(p, "EXPORT_SHEET", "Sheet1"),
        }
    }
}

// ── Split ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    pub rows_per_file: usize,
    pub read_batch_rows: usize,
    pub write_row_group_rows: usize,
    /// Codec name: snappy, gzip, zstd or none.
    pub compression: String,
}

impl SplitConfig {
    fn from_env_profiled(p: &str) -> Self {
        Self {
            rows_per_file: profiled_env_usize(p, "SPLIT_ROWS_PER_FILE", 200_000),
            read_batch_rows: profiled_env_usize(p, "SPLIT_READ_BATCH_ROWS", 100_000),
            write_row_group_rows: profiled_env_usize(p, "SPLIT_ROW_GROUP_ROWS", 100_000),
            compression: profiled_env_or(p, "SPLIT_COMPRESSION", "snappy").to_lowercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env-based tests must run serially to avoid interfering with each other.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_env() {
        let keys = [
            "BITEXT_PROFILE",
            "NEPALI_COL",
            "ENGLISH_COL",
            "MIN_ALPHA_RATIO",
            "MAX_SYMBOL_RATIO",
            "EXPORT_CHUNK_SIZE",
            "EXPORT_SHEET",
            "SPLIT_ROWS_PER_FILE",
            "SPLIT_READ_BATCH_ROWS",
            "SPLIT_ROW_GROUP_ROWS",
            "SPLIT_COMPRESSION",
            "TEST_NEPALI_COL",
            "TEST_EXPORT_CHUNK_SIZE",
        ];
        for k in keys {
            env::remove_var(k);
        }
    }

    #[test]
    fn defaults_when_no_env_vars() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env();

        let cfg = Config::for_profile("");
        assert_eq!(cfg.profile_label(), "default");
        assert_eq!(cfg.clean.nepali_column, "nepali_col");
        assert_eq!(cfg.clean.english_column, "english_col");
        assert!((cfg.clean.min_alpha_ratio - 0.3).abs() < f64::EPSILON);
        assert!((cfg.clean.max_symbol_ratio - 0.5).abs() < f64::EPSILON);
        assert_eq!(cfg.export.chunk_size, 20_000);
        assert_eq!(cfg.export.sheet_name, "Sheet1");
        assert_eq!(cfg.split.rows_per_file, 200_000);
        assert_eq!(cfg.split.read_batch_rows, 100_000);
        assert_eq!(cfg.split.write_row_group_rows, 100_000);
        assert_eq!(cfg.split.compression, "snappy");
    }

    #[test]
    fn from_env_reads_vars() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env();

        env::set_var("MIN_ALPHA_RATIO", "0.45");
        env::set_var("EXPORT_CHUNK_SIZE", "500");
        env::set_var("SPLIT_COMPRESSION", "ZSTD");

        let cfg = Config::from_env();
        assert!((cfg.clean.min_alpha_ratio - 0.45).abs() < f64::EPSILON);
        assert_eq!(cfg.export.chunk_size, 500);
        assert_eq!(cfg.split.compression, "zstd");

        clear_env();
    }

    #[test]
    fn profiled_env_takes_precedence() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env();

        env::set_var("NEPALI_COL", "ne");
        env::set_var("TEST_NEPALI_COL", "ne_test");
        env::set_var("BITEXT_PROFILE", "test");

        let cfg = Config::from_env();
        assert_eq!(cfg.profile, "TEST");
        assert_eq!(cfg.clean.nepali_column, "ne_test");

        let base = Config::for_profile("");
        assert_eq!(base.clean.nepali_column, "ne");

        clear_env();
    }

    #[test]
    fn invalid_numbers_fall_back_to_default() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env();

        env::set_var("EXPORT_CHUNK_SIZE", "lots");
        env::set_var("MAX_SYMBOL_RATIO", "NaN");

        let cfg = Config::for_profile("");
        assert_eq!(cfg.export.chunk_size, 20_000);
        assert!((cfg.clean.max_symbol_ratio - 0.5).abs() < f64::EPSILON);

        clear_env();
    }

    #[test]
    fn empty_profile_is_labelled_default() {
        let _lock = ENV_LOCK.lock().unwrap();
        clear_env();

        assert_eq!(Config::for_profile("").profile_label(), "default");
        assert_eq!(Config::for_profile("STAGING").profile_label(), "STAGING");
    }
}
