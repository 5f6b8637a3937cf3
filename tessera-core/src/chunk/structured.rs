//! Structure-aware chunking
//!
//! [`StructuredChunker`] wraps a [`SentenceChunker`] and picks one of three
//! strategies from a [`StructureReport`]:
//!
//! 1. **section**: split at header lines and chunk each section body on its
//!    own, tagging chunks with `section_index` and `section_header`
//! 2. **table_aware**: keep contiguous table rows together and chunk the
//!    prose around them
//! 3. **dynamic**: classify the whole text and chunk it once at the size
//!    for that content type
//!
//! `chunk_index` runs across the whole document regardless of strategy.

use crate::chunk::config::ChunkConfig;
use crate::chunk::content::{ContentClassifier, ContentType, SizeTable};
use crate::chunk::sentence::SentenceChunker;
use crate::chunk::types::Chunk;
use crate::clean::structure::StructureReport;
use crate::metadata::{keys, Metadata};
use crate::patterns::Patterns;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use tracing::debug;

/// Toggles for the structure-aware strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureOptions {
    /// Keep table rows together
    pub preserve_tables: bool,
    /// Allow the list content type; lists chunk as text when off
    pub preserve_lists: bool,
    /// Split at detected headers
    pub respect_headers: bool,
    /// Pick chunk size per content type instead of `max_size`
    pub use_dynamic_sizing: bool,
}

impl Default for StructureOptions {
    fn default() -> Self {
        Self {
            preserve_tables: true,
            preserve_lists: true,
            respect_headers: true,
            use_dynamic_sizing: true,
        }
    }
}

/// Strategy chosen for one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkingStrategy {
    Section,
    TableAware,
    Dynamic,
}

impl ChunkingStrategy {
    /// Name stamped into `chunking_strategy`
    pub fn as_str(&self) -> &'static str {
        match self {
            ChunkingStrategy::Section => "section",
            ChunkingStrategy::TableAware => "table_aware",
            ChunkingStrategy::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for ChunkingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one structured chunking run
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredOutcome {
    pub chunks: Vec<Chunk>,
    pub strategy: ChunkingStrategy,
    /// Fragments discarded for being shorter than `min_size`
    pub dropped_fragments: usize,
    /// Characters in the discarded fragments
    pub dropped_chars: usize,
}

/// A chunk before metadata is stamped
#[derive(Debug)]
struct Draft {
    text: String,
    content_type: ContentType,
    size_used: usize,
    section: Option<(usize, String)>,
}

#[derive(Debug, Default)]
struct Drafts {
    items: Vec<Draft>,
    dropped_fragments: usize,
    dropped_chars: usize,
}

impl Drafts {
    fn drop_fragment(&mut self, text: &str) {
        self.dropped_fragments += 1;
        self.dropped_chars += text.chars().count();
    }
}

/// Structure-aware chunker composed over a [`SentenceChunker`]
#[derive(Debug, Clone)]
pub struct StructuredChunker {
    sentences: SentenceChunker,
    options: StructureOptions,
    sizes: SizeTable,
    classifier: ContentClassifier,
    patterns: &'static Patterns,
}

impl Default for StructuredChunker {
    fn default() -> Self {
        Self::new(ChunkConfig::default(), StructureOptions::default())
    }
}

impl StructuredChunker {
    /// Create a chunker with the default size table and classifier
    pub fn new(config: ChunkConfig, options: StructureOptions) -> Self {
        Self {
            sentences: SentenceChunker::new(config),
            options,
            sizes: SizeTable::default(),
            classifier: ContentClassifier::default(),
            patterns: Patterns::get(),
        }
    }

    /// Replace the size table
    pub fn with_sizes(mut self, sizes: SizeTable) -> Self {
        self.sizes = sizes;
        self
    }

    /// Replace the content classifier
    pub fn with_classifier(mut self, classifier: ContentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn config(&self) -> &ChunkConfig {
        self.sentences.config()
    }

    pub fn options(&self) -> &StructureOptions {
        &self.options
    }

    pub fn sizes(&self) -> &SizeTable {
        &self.sizes
    }

    /// First matching branch: headers, then tables, then dynamic sizing
    pub fn select_strategy(&self, structure: &StructureReport) -> ChunkingStrategy {
        if self.options.respect_headers && structure.has_headers {
            ChunkingStrategy::Section
        } else if self.options.preserve_tables && structure.has_tables {
            ChunkingStrategy::TableAware
        } else {
            ChunkingStrategy::Dynamic
        }
    }

    /// Chunk `text`, copying `metadata` into every chunk
    pub fn chunk(&self, text: &str, metadata: &Metadata, structure: &StructureReport) -> Vec<Chunk> {
        self.chunk_with_report(text, metadata, structure).chunks
    }

    /// Chunk `text` and report the strategy and dropped fragments
    pub fn chunk_with_report(
        &self,
        text: &str,
        metadata: &Metadata,
        structure: &StructureReport,
    ) -> StructuredOutcome {
        let strategy = self.select_strategy(structure);
        debug!(strategy = strategy.as_str(), "selected chunking strategy");

        let drafts = match strategy {
            ChunkingStrategy::Section => self.by_section(text, &structure.header_positions),
            ChunkingStrategy::TableAware => self.table_aware(text),
            ChunkingStrategy::Dynamic => self.dynamic(text),
        };

        let total = drafts.items.len();
        let chunks = drafts
            .items
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                let mut chunk =
                    Chunk::stamped(draft.text, metadata, index, draft.content_type, draft.size_used);
                chunk.set(keys::TOTAL_CHUNKS, json!(total));
                chunk.set(keys::CHUNKING_STRATEGY, json!(strategy.as_str()));
                if let Some((section_index, header)) = draft.section {
                    chunk.set(keys::SECTION_INDEX, json!(section_index));
                    chunk.set(keys::SECTION_HEADER, json!(header));
                }
                chunk
            })
            .collect();

        StructuredOutcome {
            chunks,
            strategy,
            dropped_fragments: drafts.dropped_fragments,
            dropped_chars: drafts.dropped_chars,
        }
    }

    /// Content type with the preserve toggles applied
    fn classify(&self, text: &str) -> ContentType {
        match self.classifier.classify(text) {
            ContentType::Table if !self.options.preserve_tables => ContentType::Text,
            ContentType::List if !self.options.preserve_lists => ContentType::Text,
            other => other,
        }
    }

    /// Target size for `content_type`, never above `max_size`
    fn size_for(&self, content_type: ContentType) -> usize {
        let max_size = self.config().max_size();
        if self.options.use_dynamic_sizing {
            self.sizes.get(content_type).min(max_size)
        } else {
            max_size
        }
    }

    /// Sentence-chunk `text` at the size for `content_type`
    fn sentence_drafts(
        &self,
        text: &str,
        content_type: ContentType,
        section: Option<(usize, &str)>,
        out: &mut Drafts,
    ) {
        let size = self.size_for(content_type);
        let outcome = self.sentences.chunk_sized(text, size);
        out.dropped_fragments += outcome.dropped_fragments;
        out.dropped_chars += outcome.dropped_chars;
        out.items.extend(outcome.chunks.into_iter().map(|text| Draft {
            text,
            content_type,
            size_used: size,
            section: section.map(|(i, h)| (i, h.to_string())),
        }));
    }

    fn by_section(&self, text: &str, header_positions: &[usize]) -> Drafts {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut headers: Vec<usize> = header_positions
            .iter()
            .copied()
            .filter(|&p| p < lines.len())
            .collect();
        headers.sort_unstable();
        headers.dedup();

        let mut out = Drafts::default();

        // text before the first header belongs to no section
        let first = headers.first().copied().unwrap_or(lines.len());
        let preamble = lines[..first].join("\n");
        if !preamble.trim().is_empty() {
            let content_type = self.classify(&preamble);
            self.sentence_drafts(&preamble, content_type, None, &mut out);
        }

        debug!(sections = headers.len(), "section chunking");
        for (section_index, &start) in headers.iter().enumerate() {
            let end = headers.get(section_index + 1).copied().unwrap_or(lines.len());
            let header = lines[start].trim();
            let body = lines[start + 1..end].join("\n");
            let section = Some((section_index, header));

            if body.trim().is_empty() {
                self.heading_draft(header, section, &mut out);
            } else {
                let content_type = self.classify(&body);
                self.sentence_drafts(&body, content_type, section, &mut out);
            }
        }
        out
    }

    /// A header with no body still yields a chunk so the heading survives
    fn heading_draft(&self, header: &str, section: Option<(usize, &str)>, out: &mut Drafts) {
        let len = header.chars().count();
        let size = self.size_for(ContentType::Heading);
        if len == 0 {
            return;
        }
        if len > size {
            self.sentence_drafts(header, ContentType::Heading, section, out);
            return;
        }
        if len < self.config().min_size() {
            out.drop_fragment(header);
            return;
        }
        out.items.push(Draft {
            text: header.to_string(),
            content_type: ContentType::Heading,
            size_used: size,
            section: section.map(|(i, h)| (i, h.to_string())),
        });
    }

    fn table_aware(&self, text: &str) -> Drafts {
        let mut out = Drafts::default();
        let mut prose: Vec<&str> = Vec::new();
        let mut rows: Vec<&str> = Vec::new();

        for line in text.split('\n') {
            if self.patterns.is_table_line(line) {
                if !prose.is_empty() {
                    self.prose_drafts(&prose.join("\n"), &mut out);
                    prose.clear();
                }
                rows.push(line);
            } else {
                if !rows.is_empty() {
                    self.table_drafts(&rows, &mut out);
                    rows.clear();
                }
                prose.push(line);
            }
        }
        if !rows.is_empty() {
            self.table_drafts(&rows, &mut out);
        }
        if !prose.is_empty() {
            self.prose_drafts(&prose.join("\n"), &mut out);
        }
        out
    }

    fn prose_drafts(&self, text: &str, out: &mut Drafts) {
        if !text.trim().is_empty() {
            self.sentence_drafts(text, ContentType::Text, None, out);
        }
    }

    /// One chunk per table run up to twice the table size (and at most
    /// `max_size`), otherwise split between rows with the last row repeated
    /// at the head of the next piece
    ///
    /// A single row longer than `max_size` falls back to sentence chunking.
    fn table_drafts(&self, rows: &[&str], out: &mut Drafts) {
        let size = self.size_for(ContentType::Table);
        let max_size = self.config().max_size();
        let whole = rows.join("\n");

        let pieces = if whole.chars().count() <= size.saturating_mul(2).min(max_size) {
            vec![whole]
        } else {
            split_rows(rows, size)
        };
        debug!(rows = rows.len(), pieces = pieces.len(), "table run");

        for piece in pieces {
            let piece = piece.trim().to_string();
            let len = piece.chars().count();
            if len == 0 {
                continue;
            }
            if len > max_size {
                let outcome = self.sentences.chunk_sized(&piece, max_size);
                out.dropped_fragments += outcome.dropped_fragments;
                out.dropped_chars += outcome.dropped_chars;
                out.items.extend(outcome.chunks.into_iter().map(|text| Draft {
                    text,
                    content_type: ContentType::Table,
                    size_used: max_size,
                    section: None,
                }));
                continue;
            }
            if len < self.config().min_size() {
                out.drop_fragment(&piece);
                continue;
            }
            out.items.push(Draft {
                text: piece,
                content_type: ContentType::Table,
                size_used: size,
                section: None,
            });
        }
    }

    fn dynamic(&self, text: &str) -> Drafts {
        let content_type = self.classify(text);
        debug!(content_type = content_type.as_str(), "dynamic sizing");
        let mut out = Drafts::default();
        self.sentence_drafts(text, content_type, None, &mut out);
        out
    }
}

/// Pack whole rows into pieces of at most `limit` characters
///
/// A row longer than `limit` becomes a piece on its own. Consecutive pieces
/// share one row when that row fits alongside the next one.
fn split_rows(rows: &[&str], limit: usize) -> Vec<String> {
    let lens: Vec<usize> = rows.iter().map(|r| r.chars().count()).collect();
    let mut pieces = Vec::new();
    let mut start = 0;

    while start < rows.len() {
        let mut end = start + 1;
        let mut len = lens[start];
        while end < rows.len() && len + 1 + lens[end] <= limit {
            len += 1 + lens[end];
            end += 1;
        }
        pieces.push(rows[start..end].join("\n"));

        if end >= rows.len() {
            break;
        }
        let carry = end - start > 1 && lens[end - 1] + 1 + lens[end] <= limit;
        start = if carry { end - 1 } else { end };
    }

    pieces
}
