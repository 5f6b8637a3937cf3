//! Document-type gate
//!
//! Decides whether a document goes through cleaning and structure-aware
//! chunking or straight to the sentence chunker.

use crate::metadata::{get_str, keys, Metadata};
use crate::patterns::Patterns;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Source formats that are always treated as structured
pub const STRUCTURED_FORMATS: [&str; 8] =
    ["pdf", "docx", "doc", "pptx", "html", "htm", "md", "markdown"];

/// Number of content indicators that make a document structured
pub const INDICATOR_THRESHOLD: usize = 2;

/// Why the gate decided the way it did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateDecision {
    pub structured: bool,
    /// Structured source format declared in metadata, if any
    pub declared_format: Option<String>,
    /// Number of content indicators found, out of four
    pub indicators: usize,
}

/// Classifies documents as structured or plain
#[derive(Debug, Clone)]
pub struct DocumentGate {
    patterns: &'static Patterns,
}

impl Default for DocumentGate {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentGate {
    pub fn new() -> Self {
        Self {
            patterns: Patterns::get(),
        }
    }

    /// Whether `text` should take the structured path
    pub fn is_structured(&self, text: &str, metadata: &Metadata) -> bool {
        self.decide(text, metadata).structured
    }

    /// Check declared format first, then count content indicators
    pub fn decide(&self, text: &str, metadata: &Metadata) -> GateDecision {
        if let Some(format) = declared_format(metadata) {
            debug!(format = format.as_str(), "structured by declared format");
            return GateDecision {
                structured: true,
                declared_format: Some(format),
                indicators: 0,
            };
        }

        let indicators = self.count_indicators(text);
        let structured = indicators >= INDICATOR_THRESHOLD;
        debug!(indicators, structured, "gate content indicators");
        GateDecision {
            structured,
            declared_format: None,
            indicators,
        }
    }

    /// Page-number line, localized page line, pipe row, 3+ blank lines
    pub fn count_indicators(&self, text: &str) -> usize {
        let p = self.patterns;
        [
            &p.gate_page_number,
            &p.gate_localized_page,
            &p.gate_table_pipe,
            &p.gate_blank_run,
        ]
        .iter()
        .filter(|re| re.is_match(text))
        .count()
    }
}

/// Structured format named by `document_type`, `source_format` or the
/// extension of `source`
fn declared_format(metadata: &Metadata) -> Option<String> {
    for key in [keys::DOCUMENT_TYPE, keys::SOURCE_FORMAT] {
        if let Some(value) = get_str(metadata, key) {
            let value = value.trim().trim_start_matches('.').to_ascii_lowercase();
            if STRUCTURED_FORMATS.contains(&value.as_str()) {
                return Some(value);
            }
        }
    }

    let source = get_str(metadata, keys::SOURCE)?;
    let (_, extension) = source.rsplit_once('.')?;
    let extension = extension.to_ascii_lowercase();
    STRUCTURED_FORMATS
        .contains(&extension.as_str())
        .then_some(extension)
}

/// Gate `text` with the default pattern set
pub fn is_structured(text: &str, metadata: &Metadata) -> bool {
    DocumentGate::new().is_structured(text, metadata)
}
