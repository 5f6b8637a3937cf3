//! Script-specific character normalization
//!
//! Canonicalizes Arabic-script variants so that chunks embed and match
//! consistently. Steps run in a fixed order:
//!
//! 1. fold alef shapes onto bare alef
//! 2. fold alef maksura onto yeh
//! 3. strip diacritical marks
//! 4. strip tatweel
//! 5. map Perso-Arabic lookalikes onto Arabic letters
//! 6. collapse runs of 3+ identical characters to exactly 2
//! 7. trim surrounding whitespace
//!
//! Steps 1-5 are single-character rewrites whose outputs are never inputs of
//! another rewrite, so one pass reaches a fixed point.

pub mod tables;

use serde::{Deserialize, Serialize};

/// Normalization toggles
///
/// With every toggle off, normalization only trims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationConfig {
    /// Fold alef and yeh shape variants (steps 1 and 2)
    pub unify_letter_variants: bool,
    /// Strip combining diacritics (step 3)
    pub remove_diacritics: bool,
    /// Strip tatweel and collapse elongated runs (steps 4 and 6)
    pub remove_elongation: bool,
    /// Map Perso-Arabic lookalikes (step 5)
    pub map_lookalikes: bool,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self::all()
    }
}

impl NormalizationConfig {
    /// Every step enabled
    pub const fn all() -> Self {
        Self {
            unify_letter_variants: true,
            remove_diacritics: true,
            remove_elongation: true,
            map_lookalikes: true,
        }
    }

    /// Every step disabled (trim only)
    pub const fn none() -> Self {
        Self {
            unify_letter_variants: false,
            remove_diacritics: false,
            remove_elongation: false,
            map_lookalikes: false,
        }
    }
}

/// Stateless normalizer bound to one configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    config: NormalizationConfig,
}

impl Normalizer {
    /// Create a normalizer
    pub fn new(config: NormalizationConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &NormalizationConfig {
        &self.config
    }

    /// Normalize one string
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let folded: String = text.chars().filter_map(|ch| self.fold_char(ch)).collect();

        let collapsed = if self.config.remove_elongation {
            collapse_repeats(&folded)
        } else {
            folded
        };

        collapsed.trim().to_string()
    }

    /// Steps 1-5 for a single character; `None` deletes it
    #[inline]
    fn fold_char(&self, ch: char) -> Option<char> {
        let cfg = &self.config;

        let ch = if cfg.unify_letter_variants && tables::is_alef_variant(ch) {
            tables::ALEF
        } else if cfg.unify_letter_variants && tables::is_yeh_variant(ch) {
            tables::YEH
        } else {
            ch
        };

        if cfg.remove_diacritics && tables::is_diacritic(ch) {
            return None;
        }
        if cfg.remove_elongation && ch == tables::TATWEEL {
            return None;
        }
        if cfg.map_lookalikes {
            if let Some(mapped) = tables::lookalike(ch) {
                return Some(mapped);
            }
        }
        Some(ch)
    }
}

/// Normalize `text` with `config`
pub fn normalize(text: &str, config: &NormalizationConfig) -> String {
    Normalizer::new(*config).normalize(text)
}

/// Collapse every run of 3+ identical characters down to 2
fn collapse_repeats(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut run = 0usize;

    for ch in text.chars() {
        if Some(ch) == prev {
            run += 1;
        } else {
            prev = Some(ch);
            run = 1;
        }
        if run <= 2 {
            out.push(ch);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alef_variants_then_collapse() {
        // four alef shapes fold to four bare alefs, then collapse to two
        assert_eq!(
            normalize("أإآا", &NormalizationConfig::all()),
            "\u{0627}\u{0627}"
        );
    }

    #[test]
    fn test_yeh_variant() {
        assert_eq!(
            normalize("على", &NormalizationConfig::all()),
            "\u{0639}\u{0644}\u{064A}"
        );
    }

    #[test]
    fn test_diacritics_removed() {
        // "kataba" with full harakat
        let text = "\u{0643}\u{064E}\u{062A}\u{064E}\u{0628}\u{064E}";
        assert_eq!(
            normalize(text, &NormalizationConfig::all()),
            "\u{0643}\u{062A}\u{0628}"
        );
    }

    #[test]
    fn test_tatweel_removed() {
        let text = "\u{0643}\u{0640}\u{0640}\u{062A}\u{0628}";
        assert_eq!(
            normalize(text, &NormalizationConfig::all()),
            "\u{0643}\u{062A}\u{0628}"
        );
    }

    #[test]
    fn test_lookalikes_mapped() {
        // persian "ketab" spelled with keheh and farsi yeh
        let text = "\u{06A9}\u{062A}\u{0627}\u{0628} \u{06CC}";
        assert_eq!(
            normalize(text, &NormalizationConfig::all()),
            "\u{0643}\u{062A}\u{0627}\u{0628} \u{064A}"
        );
    }

    #[test]
    fn test_elongation_collapse_latin() {
        assert_eq!(
            normalize("soooo goood!!!", &NormalizationConfig::all()),
            "soo good!!"
        );
    }

    #[test]
    fn test_all_toggles_off_only_trims() {
        let text = "  أإآا \u{0640}\u{064E} soooo  ";
        assert_eq!(
            normalize(text, &NormalizationConfig::none()),
            text.trim()
        );
    }

    #[test]
    fn test_single_toggle() {
        let config = NormalizationConfig {
            remove_diacritics: true,
            ..NormalizationConfig::none()
        };
        // alef variants survive, diacritics do not
        assert_eq!(normalize("أَ", &config), "أ");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize("", &NormalizationConfig::all()), "");
        assert_eq!(normalize("   ", &NormalizationConfig::all()), "");
    }

    #[test]
    fn test_idempotent_on_samples() {
        let samples = [
            "أإآا",
            "  مـــرحبا بكم   ",
            "aaa   bbb",
            "\u{0627}\u{064E}\u{0627}\u{064E}\u{0627}",
            "ی ک ہ",
        ];
        let normalizer = Normalizer::default();
        for sample in samples {
            let once = normalizer.normalize(sample);
            assert_eq!(normalizer.normalize(&once), once, "sample: {sample:?}");
        }
    }
}
