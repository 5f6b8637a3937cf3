//! File reading utilities

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tessera_core::metadata::keys;
use tessera_core::Document;

/// Reads files into documents
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read a file as a document whose `source` is the path
    ///
    /// `document_type` overrides the gate's view of the format; otherwise
    /// the gate falls back to the file extension.
    pub fn read_document(path: &Path, document_type: Option<&str>) -> Result<Document> {
        let text = Self::read_text(path)?;
        let mut document = Document::new(text).meta(keys::SOURCE, path.display().to_string());
        if let Some(document_type) = document_type {
            document = document.meta(keys::DOCUMENT_TYPE, document_type);
        }
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");

        let content = "Hello, world!\nThis is a test.";
        fs::write(&file_path, content).unwrap();

        assert_eq!(FileReader::read_text(&file_path).unwrap(), content);
    }

    #[test]
    fn test_read_text_nonexistent_file() {
        let result = FileReader::read_text(Path::new("/nonexistent/file.txt"));
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("Failed to read file"));
    }

    #[test]
    fn test_read_arabic_content() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("ar.txt");

        let content = "\u{0645}\u{0631}\u{062D}\u{0628}\u{0627} \u{0628}\u{0643}\u{0645}.";
        fs::write(&file_path, content).unwrap();

        assert_eq!(FileReader::read_text(&file_path).unwrap(), content);
    }

    #[test]
    fn test_read_document_metadata() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("notes.txt");
        fs::write(&file_path, "Some notes.").unwrap();

        let doc = FileReader::read_document(&file_path, None).unwrap();
        assert_eq!(doc.text, "Some notes.");
        assert_eq!(
            doc.metadata[keys::SOURCE],
            json!(file_path.display().to_string())
        );
        assert!(!doc.metadata.contains_key(keys::DOCUMENT_TYPE));

        let doc = FileReader::read_document(&file_path, Some("pdf")).unwrap();
        assert_eq!(doc.metadata[keys::DOCUMENT_TYPE], json!("pdf"));
    }
}
