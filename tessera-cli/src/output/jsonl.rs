//! JSON Lines output formatter

use super::OutputFormatter;
use anyhow::Result;
use std::io::Write;
use tessera_core::Segmentation;

/// JSON Lines formatter - one chunk object per line, streamed
pub struct JsonLinesFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesFormatter<W> {
    /// Create a new JSON Lines formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonLinesFormatter<W> {
    fn format_document(&mut self, _source: &str, segmentation: &Segmentation) -> Result<()> {
        for chunk in &segmentation.chunks {
            serde_json::to_writer(&mut self.writer, chunk)?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
