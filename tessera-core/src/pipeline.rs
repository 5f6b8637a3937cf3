//! End-to-end segmentation of one document
//!
//! ```text
//! Document ─► gate ─┬─ structured ─► clean ─► detect ─► StructuredChunker ─┐
//!                   └─ plain ──────────────────────────► SentenceChunker ──┴─► normalize ─► chunks
//! ```

use crate::chunk::{
    sentence::stamp_text_chunks, Chunk, ChunkingStrategy, Document, SentenceChunker,
    StructuredChunker,
};
use crate::clean::{ArtifactCleaner, CleaningResult, StructureDetector, StructureReport};
use crate::config::SegmenterConfig;
use crate::error::Result;
use crate::gate::DocumentGate;
use crate::metadata::keys;
use crate::normalize::Normalizer;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How the document gate is applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateMode {
    /// Decide per document from metadata and content indicators
    #[default]
    Auto,
    /// Always clean and chunk structurally
    Structured,
    /// Always use the sentence chunker on the raw text
    Plain,
}

/// Everything produced for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segmentation {
    /// Normalized chunks in source order
    pub chunks: Vec<Chunk>,
    /// Cleaning output, on the structured path only
    pub cleaning: Option<CleaningResult>,
    /// Structure of the cleaned text, on the structured path only
    pub structure: Option<StructureReport>,
    /// Whether the structured path was taken
    pub structured: bool,
    /// Strategy used on the structured path
    pub strategy: Option<ChunkingStrategy>,
    /// Heuristic data loss notes from cleaning and chunking
    pub warnings: Vec<String>,
}

/// Configured pipeline; cheap to share across threads
#[derive(Debug, Clone)]
pub struct Segmenter {
    gate: DocumentGate,
    gate_mode: GateMode,
    cleaner: ArtifactCleaner,
    detector: StructureDetector,
    sentences: SentenceChunker,
    structured: StructuredChunker,
    normalizer: Normalizer,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            gate: DocumentGate::new(),
            gate_mode: GateMode::Auto,
            cleaner: ArtifactCleaner::default(),
            detector: StructureDetector::default(),
            sentences: SentenceChunker::default(),
            structured: StructuredChunker::default(),
            normalizer: Normalizer::default(),
        }
    }
}

impl Segmenter {
    /// Build a pipeline, validating the configuration
    pub fn new(config: &SegmenterConfig) -> Result<Self> {
        config.validate()?;
        let chunk_config = config.chunking.chunk_config()?;

        Ok(Self {
            gate: DocumentGate::new(),
            gate_mode: GateMode::Auto,
            cleaner: ArtifactCleaner::new(config.cleaning.clone())?,
            detector: config.structure.detector(),
            sentences: SentenceChunker::new(chunk_config),
            structured: StructuredChunker::new(chunk_config, config.structure.options())
                .with_sizes(config.sizes)
                .with_classifier(config.structure.classifier()),
            normalizer: Normalizer::new(config.normalization),
        })
    }

    /// Override the document gate
    pub fn with_gate_mode(mut self, gate_mode: GateMode) -> Self {
        self.gate_mode = gate_mode;
        self
    }

    pub fn gate_mode(&self) -> GateMode {
        self.gate_mode
    }

    /// Segment one document
    pub fn segment(&self, document: &Document) -> Segmentation {
        let structured = match self.gate_mode {
            GateMode::Auto => self.gate.is_structured(&document.text, &document.metadata),
            GateMode::Structured => true,
            GateMode::Plain => false,
        };

        let (mut segmentation, mut dropped) = if structured {
            self.segment_structured(document)
        } else {
            self.segment_plain(document)
        };

        self.normalize_chunks(&mut segmentation.chunks, &mut dropped);
        if let Some(note) = dropped.note() {
            segmentation.warnings.push(note);
        }

        debug!(
            chunks = segmentation.chunks.len(),
            structured, "segmented document"
        );
        segmentation
    }

    /// Segment a bare text with no metadata
    pub fn segment_text(&self, text: &str) -> Segmentation {
        self.segment(&Document::new(text))
    }

    /// Segment many documents, one result per document in input order
    ///
    /// Runs on the rayon pool when the `parallel` feature is enabled.
    pub fn segment_batch(&self, documents: &[Document]) -> Vec<Segmentation> {
        #[cfg(feature = "parallel")]
        {
            documents.par_iter().map(|doc| self.segment(doc)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            documents.iter().map(|doc| self.segment(doc)).collect()
        }
    }

    fn segment_structured(&self, document: &Document) -> (Segmentation, Dropped) {
        let cleaning = self.cleaner.clean(&document.text, &document.metadata);
        let structure = self.detector.detect(&cleaning.cleaned_text);
        let outcome =
            self.structured
                .chunk_with_report(&cleaning.cleaned_text, &cleaning.metadata, &structure);

        let dropped = Dropped {
            fragments: outcome.dropped_fragments,
            chars: outcome.dropped_chars,
        };
        let segmentation = Segmentation {
            chunks: outcome.chunks,
            warnings: cleaning.warnings.clone(),
            cleaning: Some(cleaning),
            structure: Some(structure),
            structured: true,
            strategy: Some(outcome.strategy),
        };
        (segmentation, dropped)
    }

    fn segment_plain(&self, document: &Document) -> (Segmentation, Dropped) {
        let outcome = self.sentences.chunk_with_report(&document.text);
        let chunks = stamp_text_chunks(
            outcome.chunks,
            &document.metadata,
            self.sentences.config().max_size(),
        );

        let dropped = Dropped {
            fragments: outcome.dropped_fragments,
            chars: outcome.dropped_chars,
        };
        let segmentation = Segmentation {
            chunks,
            cleaning: None,
            structure: None,
            structured: false,
            strategy: None,
            warnings: Vec::new(),
        };
        (segmentation, dropped)
    }

    /// Normalize every chunk, then drop the ones normalization shrank below
    /// `min_size` and renumber the survivors
    fn normalize_chunks(&self, chunks: &mut Vec<Chunk>, dropped: &mut Dropped) {
        let min_size = self.sentences.config().min_size();
        let before = chunks.len();

        chunks.retain_mut(|chunk| {
            chunk.text = self.normalizer.normalize(&chunk.text);
            let len = chunk.char_len();
            if len == 0 || len < min_size {
                dropped.fragments += 1;
                dropped.chars += len;
                false
            } else {
                true
            }
        });

        if chunks.len() != before {
            let total = chunks.len();
            for (index, chunk) in chunks.iter_mut().enumerate() {
                chunk.set(keys::CHUNK_INDEX, json!(index));
                chunk.set(keys::TOTAL_CHUNKS, json!(total));
            }
        }
    }
}

/// Fragments discarded under `min_size` across chunking and normalization
#[derive(Debug, Default, Clone, Copy)]
struct Dropped {
    fragments: usize,
    chars: usize,
}

impl Dropped {
    fn note(&self) -> Option<String> {
        let Dropped { fragments, chars } = *self;
        (fragments > 0).then(|| {
            let note = format!(
                "dropped {fragments} fragment(s) totalling {chars} characters below min_size"
            );
            warn!("{note}");
            note
        })
    }
}
