//! Document and chunk metadata
//!
//! Metadata is a flat string-keyed mapping of JSON values. Caller keys are
//! copied onto every chunk; the engine only ever overwrites the reserved
//! keys listed in [`keys`].

use serde_json::Value;
use std::collections::BTreeMap;

/// String-keyed metadata mapping
pub type Metadata = BTreeMap<String, Value>;

/// Keys written by the engine
pub mod keys {
    /// 0-based position of a chunk within its document
    pub const CHUNK_INDEX: &str = "chunk_index";
    /// Number of chunks produced for the document
    pub const TOTAL_CHUNKS: &str = "total_chunks";
    /// Content type of the chunk (`text`, `table`, `list`, `heading`)
    pub const CONTENT_TYPE: &str = "content_type";
    /// Target size the chunk was cut against
    pub const CHUNK_SIZE_USED: &str = "chunk_size_used";
    /// Section the chunk belongs to (section chunking only)
    pub const SECTION_INDEX: &str = "section_index";
    /// Header line of the chunk's section (section chunking only)
    pub const SECTION_HEADER: &str = "section_header";
    /// Strategy chosen by the structured chunker
    pub const CHUNKING_STRATEGY: &str = "chunking_strategy";

    /// Character count before cleaning
    pub const ORIGINAL_LENGTH: &str = "original_length";
    /// Character count after cleaning
    pub const CLEANED_LENGTH: &str = "cleaned_length";
    /// `1 - cleaned_length / original_length`
    pub const REDUCTION_RATIO: &str = "reduction_ratio";
    /// Number of page markers removed by the cleaner
    pub const NUM_PAGES_DETECTED: &str = "num_pages_detected";

    /// Source path or URI hint supplied by the extractor
    pub const SOURCE: &str = "source";
    /// Declared source format supplied by the extractor
    pub const DOCUMENT_TYPE: &str = "document_type";
    /// Alternative spelling of [`DOCUMENT_TYPE`]
    pub const SOURCE_FORMAT: &str = "source_format";
}

/// Merge `delta` into `target`, overwriting keys present in both
pub fn merge(target: &mut Metadata, delta: &Metadata) {
    for (key, value) in delta {
        target.insert(key.clone(), value.clone());
    }
}

/// Read a string value, if the key holds one
pub fn get_str<'a>(metadata: &'a Metadata, key: &str) -> Option<&'a str> {
    metadata.get(key).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_keeps_existing_keys() {
        let mut target = Metadata::new();
        target.insert("source".into(), json!("a.pdf"));
        target.insert("author".into(), json!("someone"));

        let mut delta = Metadata::new();
        delta.insert(keys::REDUCTION_RATIO.into(), json!(0.25));
        delta.insert("source".into(), json!("b.pdf"));

        merge(&mut target, &delta);
        assert_eq!(target["author"], json!("someone"));
        assert_eq!(target["source"], json!("b.pdf"));
        assert_eq!(target[keys::REDUCTION_RATIO], json!(0.25));
    }

    #[test]
    fn test_get_str() {
        let mut metadata = Metadata::new();
        metadata.insert("source".into(), json!("doc.md"));
        metadata.insert("pages".into(), json!(3));

        assert_eq!(get_str(&metadata, "source"), Some("doc.md"));
        assert_eq!(get_str(&metadata, "pages"), None);
        assert_eq!(get_str(&metadata, "missing"), None);
    }
}
