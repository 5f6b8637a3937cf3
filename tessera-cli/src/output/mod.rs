//! Output formatting module

use anyhow::Result;
use std::io::Write;
use tessera_core::{Chunk, Segmentation};

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format all chunks of one source document
    fn format_document(&mut self, source: &str, segmentation: &Segmentation) -> Result<()>;

    /// Finalize output (e.g., close the JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod jsonl;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use jsonl::JsonLinesFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Boxed writer shared by every formatter
pub type BoxedWriter = Box<dyn Write + Send + Sync>;

/// Chunk index for display, falling back to the position in the output
pub(crate) fn display_index(chunk: &Chunk, position: usize) -> usize {
    chunk.chunk_index().unwrap_or(position)
}
