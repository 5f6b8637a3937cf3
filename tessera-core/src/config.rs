//! Complete segmenter configuration as one TOML document
//!
//! ```toml
//! [normalization]
//! remove_diacritics = true
//!
//! [chunking]
//! max_size = 500
//! overlap = 50
//! min_size = 20
//!
//! [cleaning]
//! repetition_threshold = 3
//!
//! [structure]
//! respect_headers = true
//!
//! [sizes]
//! table = 250
//! ```
//!
//! Every key is optional and falls back to its documented default.

use crate::chunk::config::{defaults as chunk_defaults, ChunkConfig};
use crate::chunk::content::{defaults as content_defaults, ContentClassifier, SizeTable};
use crate::chunk::structured::StructureOptions;
use crate::clean::structure::{defaults as structure_defaults, StructureDetector};
use crate::clean::CleaningConfig;
use crate::error::{ConfigError, Result};
use crate::normalize::NormalizationConfig;
use serde::{Deserialize, Serialize};

/// `[chunking]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSection {
    pub max_size: usize,
    pub overlap: usize,
    pub min_size: usize,
}

impl Default for ChunkingSection {
    fn default() -> Self {
        Self {
            max_size: chunk_defaults::MAX_SIZE,
            overlap: chunk_defaults::OVERLAP,
            min_size: chunk_defaults::MIN_SIZE,
        }
    }
}

impl ChunkingSection {
    /// Validated chunk configuration
    pub fn chunk_config(&self) -> Result<ChunkConfig> {
        ChunkConfig::new(self.max_size, self.overlap, self.min_size)
    }
}

/// `[structure]` section: strategy toggles plus detection thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureSection {
    pub preserve_tables: bool,
    pub preserve_lists: bool,
    pub respect_headers: bool,
    pub use_dynamic_sizing: bool,
    /// Header lines must be longer than this
    pub header_min_len: usize,
    /// Header lines must be shorter than this
    pub header_max_len: usize,
    /// Share of list-marker lines for the list content type
    pub list_line_ratio: f64,
}

impl Default for StructureSection {
    fn default() -> Self {
        let options = StructureOptions::default();
        Self {
            preserve_tables: options.preserve_tables,
            preserve_lists: options.preserve_lists,
            respect_headers: options.respect_headers,
            use_dynamic_sizing: options.use_dynamic_sizing,
            header_min_len: structure_defaults::HEADER_MIN_LEN,
            header_max_len: structure_defaults::HEADER_MAX_LEN,
            list_line_ratio: content_defaults::LIST_LINE_RATIO,
        }
    }
}

impl StructureSection {
    /// Strategy toggles
    pub fn options(&self) -> StructureOptions {
        StructureOptions {
            preserve_tables: self.preserve_tables,
            preserve_lists: self.preserve_lists,
            respect_headers: self.respect_headers,
            use_dynamic_sizing: self.use_dynamic_sizing,
        }
    }

    /// Header detector with these bounds
    pub fn detector(&self) -> StructureDetector {
        StructureDetector::new(self.header_min_len, self.header_max_len)
    }

    /// Content classifier with this list ratio
    pub fn classifier(&self) -> ContentClassifier {
        ContentClassifier::new(self.list_line_ratio, content_defaults::TABLE_MARKER_COUNT)
    }

    pub fn validate(&self) -> Result<()> {
        if self.header_min_len >= self.header_max_len {
            return Err(ConfigError::InvalidValue {
                field: "structure.header_min_len",
                reason: format!(
                    "must be below header_max_len ({} >= {})",
                    self.header_min_len, self.header_max_len
                ),
            });
        }
        if !(self.list_line_ratio > 0.0 && self.list_line_ratio <= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "structure.list_line_ratio",
                reason: format!("must be in (0, 1], got {}", self.list_line_ratio),
            });
        }
        Ok(())
    }
}

/// Whole configuration surface of a [`crate::Segmenter`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmenterConfig {
    pub normalization: NormalizationConfig,
    pub chunking: ChunkingSection,
    pub cleaning: CleaningConfig,
    pub structure: StructureSection,
    pub sizes: SizeTable,
}

impl SegmenterConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: SegmenterConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every section
    pub fn validate(&self) -> Result<()> {
        self.chunking.chunk_config()?;
        self.cleaning.validate()?;
        self.structure.validate()?;
        self.sizes.validate()
    }
}
