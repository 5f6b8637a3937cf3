//! Documents in, chunks out

use crate::chunk::content::ContentType;
use crate::metadata::{keys, Metadata};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Extracted text plus the extractor's metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Decoded document text
    pub text: String,
    /// Extractor metadata (`source`, `document_type`, ...)
    #[serde(default)]
    pub metadata: Metadata,
}

impl Document {
    /// Document without metadata
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: Metadata::new(),
        }
    }

    /// Document with metadata
    pub fn with_metadata(text: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }

    /// Add one metadata entry
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A bounded text segment with its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk text
    pub text: String,
    /// Parent metadata plus the engine's reserved keys
    pub metadata: Metadata,
}

impl Chunk {
    /// Build a chunk from parent metadata, stamping the keys every chunk
    /// carries
    pub(crate) fn stamped(
        text: String,
        parent: &Metadata,
        chunk_index: usize,
        content_type: ContentType,
        chunk_size_used: usize,
    ) -> Self {
        let mut metadata = parent.clone();
        metadata.insert(keys::CHUNK_INDEX.into(), json!(chunk_index));
        metadata.insert(keys::CONTENT_TYPE.into(), json!(content_type.as_str()));
        metadata.insert(keys::CHUNK_SIZE_USED.into(), json!(chunk_size_used));
        Self { text, metadata }
    }

    /// Set a metadata entry
    pub(crate) fn set(&mut self, key: &str, value: Value) {
        self.metadata.insert(key.to_string(), value);
    }

    /// Position within the source document
    pub fn chunk_index(&self) -> Option<usize> {
        self.metadata
            .get(keys::CHUNK_INDEX)
            .and_then(Value::as_u64)
            .map(|n| n as usize)
    }

    /// Content type tag
    pub fn content_type(&self) -> Option<ContentType> {
        self.metadata
            .get(keys::CONTENT_TYPE)
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
    }

    /// Section index, when produced by section chunking
    pub fn section_index(&self) -> Option<usize> {
        self.metadata
            .get(keys::SECTION_INDEX)
            .and_then(Value::as_u64)
            .map(|n| n as usize)
    }

    /// Section header, when produced by section chunking
    pub fn section_header(&self) -> Option<&str> {
        self.metadata.get(keys::SECTION_HEADER).and_then(Value::as_str)
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
