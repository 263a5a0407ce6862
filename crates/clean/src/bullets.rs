//! Leading list-marker removal.
//!
//! Each kind of marker has its own anchored matcher. Kinds are tried in
//! [`MarkerKind::ALL`] order and the first one that matches wins.

use std::sync::LazyLock;

use bitext_core::CellValue;
use regex::Regex;

/// Upper bound on markers removed from a single value.
pub const MAX_STRIP_PASSES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// `•`, `·`, `○`, `◦`, `–`, `—` or `-`.
    BulletGlyph,
    /// `(12)` or `(12).` in any decimal script.
    ParenDecimal,
    /// `12.` or `12)` in any decimal script.
    DecimalSuffix,
    /// `(१२)` or `(१२).` Already covered by [`MarkerKind::ParenDecimal`]
    /// during detection, but matchable on its own.
    ParenDevanagari,
    /// `१२.` or `१२)`
    DevanagariSuffix,
    /// `a.`, `A)`
    LetterSuffix,
    /// `iv.`, `IX)`
    RomanSuffix,
}

static BULLET_GLYPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\x{2022}\x{00B7}\x{25CB}\x{25E6}\x{2013}\x{2014}\-]")
        .expect("valid bullet glyph regex")
});
static PAREN_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\s*\d+\s*\)\.?").expect("valid paren decimal regex"));
static DECIMAL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]").expect("valid decimal suffix regex"));
static PAREN_DEVANAGARI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(\s*[\x{0966}-\x{096F}]+\s*\)\.?").expect("valid paren devanagari regex")
});
static DEVANAGARI_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\x{0966}-\x{096F}]+[.)]").expect("valid devanagari suffix regex")
});
static LETTER_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][.)]").expect("valid letter suffix regex"));
static ROMAN_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[IVXLCDMivxlcdm]+[.)]").expect("valid roman suffix regex"));

impl MarkerKind {
    /// Priority order used by [`detect_marker`].
    pub const ALL: [MarkerKind; 7] = [
        MarkerKind::BulletGlyph,
        MarkerKind::ParenDecimal,
        MarkerKind::DecimalSuffix,
        MarkerKind::ParenDevanagari,
        MarkerKind::DevanagariSuffix,
        MarkerKind::LetterSuffix,
        MarkerKind::RomanSuffix,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            MarkerKind::BulletGlyph => &BULLET_GLYPH,
            MarkerKind::ParenDecimal => &PAREN_DECIMAL,
            MarkerKind::DecimalSuffix => &DECIMAL_SUFFIX,
            MarkerKind::ParenDevanagari => &PAREN_DEVANAGARI,
            MarkerKind::DevanagariSuffix => &DEVANAGARI_SUFFIX,
            MarkerKind::LetterSuffix => &LETTER_SUFFIX,
            MarkerKind::RomanSuffix => &ROMAN_SUFFIX,
        }
    }

    /// Byte length of this kind of marker at the very start of `text`.
    pub fn match_len(self, text: &str) -> Option<usize> {
        self.pattern().find(text).map(|m| m.end())
    }
}

/// First marker kind, in priority order, found after any leading whitespace.
/// The returned length is measured from the start of the trimmed text.
pub fn detect_marker(text: &str) -> Option<(MarkerKind, usize)> {
    let text = text.trim_start();
    MarkerKind::ALL
        .iter()
        .find_map(|&kind| kind.match_len(text).map(|len| (kind, len)))
}

/// Remove one leading marker and the whitespace after it.
/// Returns `None` when the text does not start with a marker.
pub fn strip_one_marker(text: &str) -> Option<String> {
    let trimmed = text.trim_start();
    let (_, len) = detect_marker(trimmed)?;
    Some(trimmed[len..].trim_start().to_string())
}

/// Strip up to [`MAX_STRIP_PASSES`] leading markers, stopping as soon as a
/// pass leaves the text unchanged.
pub fn strip_bullets(text: &str) -> String {
    let mut out = text.to_string();
    for _ in 0..MAX_STRIP_PASSES {
        match strip_one_marker(&out) {
            Some(next) if next != out => out = next,
            _ => break,
        }
    }
    out
}

/// Non-text cells come back unchanged.
pub fn strip_bullets_cell(cell: &CellValue) -> CellValue {
    match cell {
        CellValue::Text(s) => CellValue::Text(strip_bullets(s)),
        other => other.clone(),
    }
}
