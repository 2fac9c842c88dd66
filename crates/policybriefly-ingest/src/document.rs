//! The extracted document handed to every analysis.

use serde::{Deserialize, Serialize};

/// Where a document's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Text,
    Pdf,
}

impl SourceType {
    /// Detect the source type from a declared MIME type and the filename.
    ///
    /// A declared `application/pdf` or a `.pdf` extension selects PDF;
    /// everything else is treated as text.
    pub fn detect(filename: &str, declared_mime: Option<&str>) -> Self {
        if let Some(mime) = declared_mime {
            if mime.eq_ignore_ascii_case("application/pdf") {
                return Self::Pdf;
            }
        }
        let ext = std::path::Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        if ext.eq_ignore_ascii_case("pdf") {
            Self::Pdf
        } else {
            Self::Text
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceType::Text => write!(f, "text"),
            SourceType::Pdf => write!(f, "pdf"),
        }
    }
}

/// Raw text of one uploaded document. Immutable once extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    text: String,
    filename: String,
    source_type: SourceType,
    pages: usize,
}

impl Document {
    pub(crate) fn new(text: String, filename: &str, source_type: SourceType, pages: usize) -> Self {
        Self {
            text,
            filename: filename.to_string(),
            source_type,
            pages,
        }
    }

    /// Build a text document directly, for pasted text and tests.
    pub fn from_text(text: impl Into<String>, filename: &str) -> Self {
        Self::new(text.into(), filename, SourceType::Text, 1)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn source_type(&self) -> SourceType {
        self.source_type
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Number of characters (not bytes).
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// First `max_chars` characters, with `...` appended when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        let mut chars = self.text.char_indices();
        match chars.nth(max_chars) {
            Some((idx, _)) => format!("{}...", &self.text[..idx]),
            None => self.text.clone(),
        }
    }

    pub fn info(&self) -> DocumentInfo {
        DocumentInfo {
            filename: self.filename.clone(),
            source_type: self.source_type,
            pages: self.pages,
            characters: self.char_count(),
            words: self.text.split_whitespace().count(),
        }
    }
}

/// Lightweight description of a document, safe to echo back to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub filename: String,
    #[serde(rename = "sourceType")]
    pub source_type: SourceType,
    pub pages: usize,
    pub characters: usize,
    pub words: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_source_type() {
        assert_eq!(SourceType::detect("rule.pdf", None), SourceType::Pdf);
        assert_eq!(SourceType::detect("RULE.PDF", None), SourceType::Pdf);
        assert_eq!(SourceType::detect("notes.txt", None), SourceType::Text);
        assert_eq!(SourceType::detect("upload", Some("application/pdf")), SourceType::Pdf);
        assert_eq!(SourceType::detect("upload", Some("text/plain")), SourceType::Text);
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let doc = Document::from_text("héllo wörld", "a.txt");
        assert_eq!(doc.preview(5), "héllo...");
        assert_eq!(doc.preview(100), "héllo wörld");
        assert_eq!(doc.char_count(), 11);
    }

    #[test]
    fn test_info() {
        let doc = Document::from_text("one two three", "a.txt");
        let info = doc.info();
        assert_eq!(info.words, 3);
        assert_eq!(info.characters, 13);
        assert_eq!(info.source_type, SourceType::Text);
    }
}
