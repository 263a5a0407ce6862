//! Letter/symbol density heuristic for low-quality text.

use serde::{Deserialize, Serialize};
use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NonsenseThresholds {
    /// Below this fraction of letters the text is nonsense.
    pub min_alpha_ratio: f64,
    /// Above this fraction of symbols and punctuation the text is nonsense.
    pub max_symbol_ratio: f64,
}

impl Default for NonsenseThresholds {
    fn default() -> Self {
        Self {
            min_alpha_ratio: 0.3,
            max_symbol_ratio: 0.5,
        }
    }
}

/// Character counts by Unicode general category group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharProfile {
    pub total: usize,
    pub letters: usize,
    pub symbols: usize,
}

impl CharProfile {
    pub fn of(text: &str) -> Self {
        let mut profile = CharProfile::default();
        for c in text.chars() {
            profile.total += 1;
            match c.general_category_group() {
                GeneralCategoryGroup::Letter => profile.letters += 1,
                GeneralCategoryGroup::Punctuation | GeneralCategoryGroup::Symbol => {
                    profile.symbols += 1
                }
                _ => {}
            }
        }
        profile
    }

    pub fn letter_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.letters as f64 / self.total as f64
        }
    }

    pub fn symbol_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.symbols as f64 / self.total as f64
        }
    }
}

/// Empty text is always nonsense. Otherwise either too many symbols or too
/// few letters is enough.
pub fn looks_nonsense(text: &str, thresholds: &NonsenseThresholds) -> bool {
    if text.is_empty() {
        return true;
    }
    let profile = CharProfile::of(text);
    profile.symbol_ratio() > thresholds.max_symbol_ratio
        || profile.letter_ratio() < thresholds.min_alpha_ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_nonsense() {
        assert!(looks_nonsense("", &NonsenseThresholds::default()));
    }

    #[test]
    fn punctuation_only_is_nonsense() {
        assert!(looks_nonsense("!!!???", &NonsenseThresholds::default()));
        assert!(looks_nonsense("$$$ ###", &NonsenseThresholds::default()));
    }

    #[test]
    fn normal_sentences_pass() {
        let t = NonsenseThresholds::default();
        assert!(!looks_nonsense("This is a normal sentence.", &t));
        assert!(!looks_nonsense("Hello", &t));
    }

    #[test]
    fn digits_lower_letter_ratio() {
        // 2 letters out of 9 chars: below 0.3, no symbols.
        assert!(looks_nonsense("ab 123456", &NonsenseThresholds::default()));
    }

    #[test]
    fn devanagari_vowel_signs_are_not_letters() {
        // न म स त are letters; the virama and the e-sign are marks.
        let profile = CharProfile::of("नमस्ते");
        assert_eq!(profile.total, 6);
        assert_eq!(profile.letters, 4);
        assert_eq!(profile.symbols, 0);
        assert!(!looks_nonsense("नमस्ते", &NonsenseThresholds::default()));
    }

    #[test]
    fn either_threshold_fires_independently() {
        // Half symbols, half letters.
        let text = "ab!?";
        let strict_symbols = NonsenseThresholds {
            min_alpha_ratio: 0.0,
            max_symbol_ratio: 0.4,
        };
        assert!(looks_nonsense(text, &strict_symbols));

        let strict_letters = NonsenseThresholds {
            min_alpha_ratio: 0.6,
            max_symbol_ratio: 1.0,
        };
        assert!(looks_nonsense(text, &strict_letters));

        let lenient = NonsenseThresholds {
            min_alpha_ratio: 0.5,
            max_symbol_ratio: 0.5,
        };
        assert!(!looks_nonsense(text, &lenient));
    }

    #[test]
    fn profile_ratios() {
        let p = CharProfile::of("a-b ");
        assert_eq!(p, CharProfile { total: 4, letters: 2, symbols: 1 });
        assert!((p.letter_ratio() - 0.5).abs() < f64::EPSILON);
        assert!((p.symbol_ratio() - 0.25).abs() < f64::EPSILON);
        assert_eq!(CharProfile::of("").letter_ratio(), 0.0);
    }
}
