//! Document artifact cleaning
//!
//! Removes recurring non-content noise from extracted document text: page
//! markers, running headers and footers, footer singletons, invisible and
//! control characters, excess whitespace and stray fragments.
//!
//! Boilerplate removal is a frequency heuristic. Any line repeated at least
//! `repetition_threshold` times is removed everywhere, including genuinely
//! repeated short content. Every such removal is reported in
//! [`CleaningResult::warnings`].

pub mod structure;

pub use structure::{detect_structure, StructureDetector, StructureReport};

use crate::error::{ConfigError, Result};
use crate::metadata::{self, keys, Metadata};
use crate::patterns::Patterns;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Default cleaning thresholds
pub mod defaults {
    /// Lines shorter than this (characters, trimmed) are dropped and never
    /// counted as boilerplate
    pub const MIN_LINE_LENGTH: usize = 3;

    /// A line seen this many times is treated as a running header/footer
    pub const REPETITION_THRESHOLD: usize = 3;

    /// Reduction ratio above which a warning is attached to the result
    pub const HIGH_REDUCTION_RATIO: f64 = 0.5;
}

/// Cleaning toggles and thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Drop page-marker lines
    pub remove_page_numbers: bool,
    /// Drop repeated lines and footer singletons
    pub remove_headers_footers: bool,
    /// Collapse whitespace and delete invisible/control characters
    pub clean_artifacts: bool,
    /// Conservative folding of presentation forms and Persian letters
    pub normalize_script: bool,
    /// Minimum trimmed line length in characters
    pub min_line_length: usize,
    /// Occurrences after which a line counts as boilerplate
    pub repetition_threshold: usize,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            remove_page_numbers: true,
            remove_headers_footers: true,
            clean_artifacts: true,
            normalize_script: false,
            min_line_length: defaults::MIN_LINE_LENGTH,
            repetition_threshold: defaults::REPETITION_THRESHOLD,
        }
    }
}

impl CleaningConfig {
    /// Validate thresholds
    pub fn validate(&self) -> Result<()> {
        if self.repetition_threshold < 2 {
            return Err(ConfigError::InvalidValue {
                field: "repetition_threshold",
                reason: format!(
                    "must be at least 2, got {}; 1 would remove every line",
                    self.repetition_threshold
                ),
            });
        }
        Ok(())
    }
}

/// Output of [`ArtifactCleaner::clean`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningResult {
    /// Text after cleaning
    pub cleaned_text: String,
    /// Keys added by cleaning: lengths, reduction ratio, page count
    pub metadata_delta: Metadata,
    /// Caller metadata with `metadata_delta` merged in
    pub metadata: Metadata,
    /// Informational notes about heuristic data loss
    pub warnings: Vec<String>,
}

impl CleaningResult {
    /// `1 - cleaned_length / original_length`
    pub fn reduction_ratio(&self) -> f64 {
        self.metadata_delta
            .get(keys::REDUCTION_RATIO)
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }
}

/// Removes page markers, boilerplate and artifacts from extracted text
#[derive(Debug, Clone)]
pub struct ArtifactCleaner {
    config: CleaningConfig,
    patterns: &'static Patterns,
}

impl Default for ArtifactCleaner {
    fn default() -> Self {
        Self {
            config: CleaningConfig::default(),
            patterns: Patterns::get(),
        }
    }
}

impl ArtifactCleaner {
    /// Create a cleaner, validating the configuration
    pub fn new(config: CleaningConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            patterns: Patterns::get(),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Clean `text`, merging cleaning statistics into a copy of `metadata`
    pub fn clean(&self, text: &str, metadata: &Metadata) -> CleaningResult {
        let original_length = text.chars().count();

        // whitespace-only input counts as empty: nothing was removed
        if text.trim().is_empty() {
            return self.finish(String::new(), 0, None, metadata, Vec::new());
        }

        let mut warnings = Vec::new();
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let mut lines: Vec<&str> = text.split('\n').collect();

        let mut pages_detected = None;
        if self.config.remove_page_numbers {
            let before = lines.len();
            lines.retain(|line| !self.patterns.page_marker.is_match(line.trim()));
            let removed = before - lines.len();
            debug!(removed, "removed page markers");
            pages_detected = Some(removed);
        }

        if self.config.remove_headers_footers {
            let repeated = self.repeated_lines(&lines);
            if !repeated.is_empty() {
                let before = lines.len();
                lines.retain(|line| !repeated.contains(line.trim()));
                let removed = before - lines.len();

                let mut samples: Vec<&str> = repeated.iter().copied().collect();
                samples.sort_unstable();
                let message = format!(
                    "removed {removed} line(s) as repeated boilerplate (threshold {}): {:?}",
                    self.config.repetition_threshold, samples
                );
                warn!("{message}");
                warnings.push(message);
            }
        }

        let mut joined = lines.join("\n");

        if self.config.remove_headers_footers {
            joined = self.remove_footer_singletons(&joined);
        }

        if self.config.clean_artifacts {
            joined = self.collapse_artifacts(&joined);
        }

        if self.config.normalize_script {
            joined = fold_script(&joined);
        }

        let mut cleaned = self.drop_short_lines(&joined);
        if self.config.clean_artifacts {
            cleaned = self
                .patterns
                .newline_run
                .replace_all(&cleaned, "\n\n")
                .into_owned();
        }
        let cleaned = cleaned.trim().to_string();

        self.finish(cleaned, original_length, pages_detected, metadata, warnings)
    }

    /// Analyse structure with default thresholds
    ///
    /// Independent of [`ArtifactCleaner::clean`]; callers usually pass the
    /// cleaned text so header positions refer to the text being chunked.
    pub fn detect_structure(&self, text: &str) -> StructureReport {
        detect_structure(text)
    }

    /// Trimmed lines seen at least `repetition_threshold` times
    fn repeated_lines<'a>(&self, lines: &[&'a str]) -> HashSet<&'a str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for &line in lines {
            let trimmed: &'a str = line.trim();
            if trimmed.chars().count() >= self.config.min_line_length {
                *counts.entry(trimmed).or_insert(0) += 1;
            }
        }
        counts
            .into_iter()
            .filter(|(_, count)| *count >= self.config.repetition_threshold)
            .map(|(line, _)| line)
            .collect()
    }

    fn remove_footer_singletons(&self, text: &str) -> String {
        let p = self.patterns;
        let text = p.horizontal_rule.replace_all(text, "");
        let text = p.copyright.replace_all(&text, "");
        p.bare_url.replace_all(&text, "").into_owned()
    }

    fn collapse_artifacts(&self, text: &str) -> String {
        let p = self.patterns;
        let text = p.invisible.replace_all(text, "");
        let text = p.control.replace_all(&text, "");
        let text = p.space_run.replace_all(&text, " ");
        p.newline_run.replace_all(&text, "\n\n").into_owned()
    }

    /// Drop non-blank lines shorter than `min_line_length`; blank lines stay
    /// because header detection depends on them
    fn drop_short_lines(&self, text: &str) -> String {
        text.split('\n')
            .filter(|line| {
                let trimmed = line.trim();
                trimmed.is_empty() || trimmed.chars().count() >= self.config.min_line_length
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn finish(
        &self,
        cleaned_text: String,
        original_length: usize,
        pages_detected: Option<usize>,
        metadata: &Metadata,
        mut warnings: Vec<String>,
    ) -> CleaningResult {
        let cleaned_length = cleaned_text.chars().count();
        let reduction_ratio = if original_length == 0 {
            0.0
        } else {
            1.0 - cleaned_length as f64 / original_length as f64
        };

        if reduction_ratio > defaults::HIGH_REDUCTION_RATIO {
            let message = format!(
                "cleaning removed {:.0}% of characters ({original_length} -> {cleaned_length})",
                reduction_ratio * 100.0
            );
            warn!("{message}");
            warnings.push(message);
        }

        let mut delta = Metadata::new();
        delta.insert(keys::ORIGINAL_LENGTH.into(), json!(original_length));
        delta.insert(keys::CLEANED_LENGTH.into(), json!(cleaned_length));
        delta.insert(keys::REDUCTION_RATIO.into(), json!(reduction_ratio));
        if let Some(pages) = pages_detected.filter(|&n| n > 0) {
            delta.insert(keys::NUM_PAGES_DETECTED.into(), json!(pages));
        }

        let mut merged = metadata.clone();
        metadata::merge(&mut merged, &delta);

        CleaningResult {
            cleaned_text,
            metadata_delta: delta,
            metadata: merged,
            warnings,
        }
    }
}

/// Lam-alef ligatures and Persian letter shapes commonly produced by PDF
/// extraction, with their plain Arabic spellings
const SCRIPT_FOLDS: [(char, &str); 10] = [
    ('\u{FEFB}', "\u{0644}\u{0627}"),
    ('\u{FEFC}', "\u{0644}\u{0627}"),
    ('\u{FEF7}', "\u{0644}\u{0623}"),
    ('\u{FEF8}', "\u{0644}\u{0623}"),
    ('\u{FEF9}', "\u{0644}\u{0625}"),
    ('\u{FEFA}', "\u{0644}\u{0625}"),
    ('\u{FEF5}', "\u{0644}\u{0622}"),
    ('\u{FEF6}', "\u{0644}\u{0622}"),
    ('\u{06CC}', "\u{064A}"),
    ('\u{06A9}', "\u{0643}"),
];

/// Fold ligatures and Persian letter shapes onto plain Arabic letters
pub fn fold_script(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match SCRIPT_FOLDS.iter().find(|(from, _)| *from == ch) {
            Some((_, to)) => out.push_str(to),
            None => out.push(ch),
        }
    }
    out
}
