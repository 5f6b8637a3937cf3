//! Structural text segmentation for retrieval pipelines
//!
//! This crate turns raw extracted document text into normalized, bounded,
//! metadata-tagged chunks ready for embedding. Every step is deterministic
//! and rule-based:
//!
//! - **Cleaning**: page markers, repeated running headers/footers, invisible
//!   characters and excess whitespace are removed ([`clean`])
//! - **Structure detection**: tables, lists and headers ([`clean::structure`])
//! - **Chunking**: sentence-bounded greedy packing with overlap, driven by
//!   section boundaries, table runs and content-type sizes ([`chunk`])
//! - **Normalization**: Arabic-script letter variants, diacritics and
//!   elongation are canonicalized per chunk ([`normalize`])
//!
//! # Example
//!
//! ```rust
//! use tessera_core::{Document, Segmenter};
//!
//! let segmenter = Segmenter::default();
//! let doc = Document::new("Page 1\n\nIntroduction to the report.\n\nPage 2\n\nMore findings follow here.")
//!     .meta("document_type", "pdf");
//!
//! let result = segmenter.segment(&doc);
//! assert!(result.structured);
//! assert!(result.chunks.iter().all(|c| !c.text.contains("Page 1")));
//! ```
//!
//! Lower-level pieces can be used on their own:
//!
//! ```rust
//! use tessera_core::{ChunkConfig, SentenceChunker};
//!
//! let config = ChunkConfig::builder().max_size(20).overlap(5).min_size(5).build().unwrap();
//! let chunks = SentenceChunker::new(config).chunk("Sentence one. Sentence two. Sentence three.");
//! assert!(chunks.len() >= 2);
//! ```

pub mod chunk;
pub mod clean;
pub mod config;
pub mod error;
pub mod gate;
pub mod metadata;
pub mod normalize;
pub mod patterns;
pub mod pipeline;

pub use chunk::{
    Chunk, ChunkConfig, ChunkConfigBuilder, ChunkOutcome, ChunkingStrategy, ContentClassifier,
    ContentType, Document, SentenceChunker, SizeTable, StructureOptions, StructuredChunker,
};
pub use clean::{
    detect_structure, ArtifactCleaner, CleaningConfig, CleaningResult, StructureDetector,
    StructureReport,
};
pub use config::SegmenterConfig;
pub use error::{ConfigError, Result};
pub use gate::{is_structured, DocumentGate, GateDecision};
pub use metadata::Metadata;
pub use normalize::{normalize, NormalizationConfig, Normalizer};
pub use pipeline::{GateMode, Segmentation, Segmenter};
