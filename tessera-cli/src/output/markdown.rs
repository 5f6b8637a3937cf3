//! Markdown output formatter

use super::{display_index, OutputFormatter};
use anyhow::Result;
use std::io::Write;
use tessera_core::Segmentation;

/// Markdown formatter - one section per document, one subsection per chunk
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    chunk_count: usize,
    document_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            chunk_count: 0,
            document_count: 0,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_document(&mut self, source: &str, segmentation: &Segmentation) -> Result<()> {
        self.document_count += 1;
        writeln!(self.writer, "# {source}")?;
        writeln!(self.writer)?;

        for (position, chunk) in segmentation.chunks.iter().enumerate() {
            self.chunk_count += 1;
            let content_type = chunk
                .content_type()
                .map(|ct| ct.as_str())
                .unwrap_or("text");
            write!(
                self.writer,
                "## Chunk {} ({content_type}",
                display_index(chunk, position)
            )?;
            if let Some(header) = chunk.section_header().filter(|h| !h.is_empty()) {
                write!(self.writer, ", section: {header}")?;
            }
            writeln!(self.writer, ")")?;
            writeln!(self.writer)?;
            writeln!(self.writer, "{}", chunk.text)?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(
            self.writer,
            "*Total chunks: {} from {} document(s)*",
            self.chunk_count, self.document_count
        )?;
        self.writer.flush()?;
        Ok(())
    }
}
