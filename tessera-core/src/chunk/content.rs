//! Content types and the size table driving dynamic chunk sizing

use crate::error::{ConfigError, Result};
use crate::patterns::Patterns;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default sizes and classification thresholds
pub mod defaults {
    /// Target size for table chunks
    pub const TABLE_SIZE: usize = 250;
    /// Target size for list chunks
    pub const LIST_SIZE: usize = 300;
    /// Target size for heading chunks
    pub const HEADING_SIZE: usize = 150;
    /// Target size for prose
    pub const TEXT_SIZE: usize = 400;
    /// Target size for a type the table does not know
    pub const DEFAULT_SIZE: usize = 350;

    /// Share of non-blank lines that must be list items for a text to
    /// classify as a list
    pub const LIST_LINE_RATIO: f64 = 0.3;
    /// Pipe or tab count at which a text classifies as a table
    pub const TABLE_MARKER_COUNT: usize = 4;
}

/// Classification of a chunk's content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Prose
    Text,
    /// Tabular rows
    Table,
    /// List items
    List,
    /// A section header on its own
    Heading,
}

impl ContentType {
    /// All content types
    pub const ALL: [ContentType; 4] = [
        ContentType::Text,
        ContentType::Table,
        ContentType::List,
        ContentType::Heading,
    ];

    /// Lowercase name used in metadata
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Table => "table",
            ContentType::List => "list",
            ContentType::Heading => "heading",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(ContentType::Text),
            "table" => Ok(ContentType::Table),
            "list" => Ok(ContentType::List),
            "heading" => Ok(ContentType::Heading),
            other => Err(ConfigError::InvalidValue {
                field: "content_type",
                reason: format!("unknown content type '{other}'"),
            }),
        }
    }
}

/// Target chunk size per content type, in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeTable {
    pub table: usize,
    pub list: usize,
    pub heading: usize,
    pub text: usize,
    pub default: usize,
}

impl Default for SizeTable {
    fn default() -> Self {
        Self {
            table: defaults::TABLE_SIZE,
            list: defaults::LIST_SIZE,
            heading: defaults::HEADING_SIZE,
            text: defaults::TEXT_SIZE,
            default: defaults::DEFAULT_SIZE,
        }
    }
}

impl SizeTable {
    /// Size for a content type
    pub fn get(&self, content_type: ContentType) -> usize {
        match content_type {
            ContentType::Table => self.table,
            ContentType::List => self.list,
            ContentType::Heading => self.heading,
            ContentType::Text => self.text,
        }
    }

    /// Size for a content type name, falling back to `default`
    pub fn lookup(&self, name: &str) -> usize {
        name.parse::<ContentType>()
            .map(|ct| self.get(ct))
            .unwrap_or(self.default)
    }

    /// Reject zero sizes
    pub fn validate(&self) -> Result<()> {
        let entries = [
            ("sizes.table", self.table),
            ("sizes.list", self.list),
            ("sizes.heading", self.heading),
            ("sizes.text", self.text),
            ("sizes.default", self.default),
        ];
        for (field, size) in entries {
            if size == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "size must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Classifies a whole text as table, list or prose
#[derive(Debug, Clone)]
pub struct ContentClassifier {
    patterns: &'static Patterns,
    list_line_ratio: f64,
    table_marker_count: usize,
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self::new(defaults::LIST_LINE_RATIO, defaults::TABLE_MARKER_COUNT)
    }
}

impl ContentClassifier {
    /// Create a classifier with custom thresholds
    pub fn new(list_line_ratio: f64, table_marker_count: usize) -> Self {
        Self {
            patterns: Patterns::get(),
            list_line_ratio,
            table_marker_count,
        }
    }

    /// Classify `text`
    ///
    /// Table wins over list: `table_marker_count` pipes or tabs anywhere.
    /// List: at least `list_line_ratio` of the non-blank lines open with a
    /// list marker.
    pub fn classify(&self, text: &str) -> ContentType {
        let pipes = text.matches('|').count();
        let tabs = text.matches('\t').count();
        if pipes >= self.table_marker_count || tabs >= self.table_marker_count {
            return ContentType::Table;
        }

        let mut lines = 0usize;
        let mut list_lines = 0usize;
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            lines += 1;
            if self.patterns.is_list_line(line) {
                list_lines += 1;
            }
        }
        if lines > 0 && list_lines as f64 / lines as f64 >= self.list_line_ratio {
            return ContentType::List;
        }

        ContentType::Text
    }
}
