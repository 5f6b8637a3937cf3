//! Structural feature detection (tables, lists, headers)

use crate::patterns::{Patterns, HEADER_TERMINATORS};
use serde::{Deserialize, Serialize};

/// Default structure-detection thresholds
pub mod defaults {
    /// Header lines must be strictly longer than this (characters)
    pub const HEADER_MIN_LEN: usize = 10;

    /// Header lines must be strictly shorter than this (characters)
    pub const HEADER_MAX_LEN: usize = 80;
}

/// Read-only result of structural analysis over one text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureReport {
    /// Pipe rows, tab rows or dash/box-drawing rules were found
    pub has_tables: bool,
    /// At least one line opens with a list marker
    pub has_lists: bool,
    /// At least one header line was found
    pub has_headers: bool,
    /// Line indices of header lines, ascending
    pub header_positions: Vec<usize>,
    /// Number of headers found
    pub section_count: usize,
}

/// Detects tables, lists and headers
#[derive(Debug, Clone)]
pub struct StructureDetector {
    patterns: &'static Patterns,
    header_min_len: usize,
    header_max_len: usize,
}

impl Default for StructureDetector {
    fn default() -> Self {
        Self::new(defaults::HEADER_MIN_LEN, defaults::HEADER_MAX_LEN)
    }
}

impl StructureDetector {
    /// Create a detector with custom header length bounds (both exclusive)
    pub fn new(header_min_len: usize, header_max_len: usize) -> Self {
        Self {
            patterns: Patterns::get(),
            header_min_len,
            header_max_len,
        }
    }

    /// Analyse `text`
    ///
    /// The three heuristics are independent of each other. Header positions
    /// are indices into `text.split('\n')`.
    pub fn detect(&self, text: &str) -> StructureReport {
        let p = self.patterns;

        let has_tables = p.table_pipes.is_match(text)
            || p.table_rule.is_match(text)
            || p.table_tabs.is_match(text);

        let lines: Vec<&str> = text.split('\n').collect();
        let has_lists = lines.iter().any(|line| p.is_list_line(line));
        let header_positions = self.header_positions(&lines);

        StructureReport {
            has_tables,
            has_lists,
            has_headers: !header_positions.is_empty(),
            section_count: header_positions.len(),
            header_positions,
        }
    }

    /// Whether the line at `index` is a header
    pub fn is_header(&self, lines: &[&str], index: usize) -> bool {
        let Some(line) = lines.get(index) else {
            return false;
        };
        let trimmed = line.trim();
        let len = trimmed.chars().count();
        if len <= self.header_min_len || len >= self.header_max_len {
            return false;
        }
        if trimmed
            .chars()
            .last()
            .is_some_and(|c| HEADER_TERMINATORS.contains(&c))
        {
            return false;
        }
        lines
            .get(index + 1)
            .is_some_and(|next| next.trim().is_empty())
    }

    fn header_positions(&self, lines: &[&str]) -> Vec<usize> {
        (0..lines.len())
            .filter(|&i| self.is_header(lines, i))
            .collect()
    }
}

/// Analyse `text` with default thresholds
pub fn detect_structure(text: &str) -> StructureReport {
    StructureDetector::default().detect(text)
}
