//! Chunking: sizing, content types and the two chunkers

pub mod config;
pub mod content;
pub mod sentence;
pub mod structured;
pub mod types;

pub use config::{ChunkConfig, ChunkConfigBuilder};
pub use content::{ContentClassifier, ContentType, SizeTable};
pub use sentence::{split_sentences, ChunkOutcome, SentenceChunker, SENTENCE_TERMINATORS};
pub use structured::{ChunkingStrategy, StructureOptions, StructuredChunker, StructuredOutcome};
pub use types::{Chunk, Document};
