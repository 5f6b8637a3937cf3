//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tessera_core::{Chunk, Segmentation};

/// JSON formatter - outputs one array holding every document
pub struct JsonFormatter<W: Write> {
    writer: W,
    documents: Vec<DocumentData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentData {
    /// Input path
    pub source: String,
    /// Whether cleaning and structure-aware chunking ran
    pub structured: bool,
    /// Chunks with their metadata
    pub chunks: Vec<Chunk>,
    /// Data-loss warnings
    pub warnings: Vec<String>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            documents: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_document(&mut self, source: &str, segmentation: &Segmentation) -> Result<()> {
        self.documents.push(DocumentData {
            source: source.to_string(),
            structured: segmentation.structured,
            chunks: segmentation.chunks.clone(),
            warnings: segmentation.warnings.clone(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.documents)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
