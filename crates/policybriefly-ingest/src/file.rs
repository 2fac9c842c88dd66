//! File text extraction for plain text and PDF uploads.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

use policybriefly_core::{ExtractionError, Result};
use tracing::{debug, info, warn};

use crate::document::{Document, SourceType};

/// Extracts text from uploaded bytes, optionally enforcing a size limit.
#[derive(Debug, Clone, Copy, Default)]
pub struct Loader {
    max_bytes: Option<u64>,
}

impl Loader {
    pub fn new(max_bytes: u64) -> Self {
        Self {
            max_bytes: Some(max_bytes),
        }
    }

    /// Load a document from raw bytes. `declared_mime` is the content type the
    /// client sent, if any.
    pub fn load_bytes(
        &self,
        bytes: &[u8],
        filename: &str,
        declared_mime: Option<&str>,
    ) -> Result<Document> {
        if bytes.is_empty() {
            return Err(ExtractionError::Empty.into());
        }
        if let Some(limit) = self.max_bytes {
            let size = bytes.len() as u64;
            if size > limit {
                return Err(ExtractionError::TooLarge { size, limit }.into());
            }
        }

        let source_type = SourceType::detect(filename, declared_mime);
        let (text, pages) = match source_type {
            SourceType::Text => (decode_text(bytes)?, 1),
            SourceType::Pdf => extract_pdf(bytes)?,
        };

        if text.trim().is_empty() {
            return Err(match source_type {
                SourceType::Pdf => ExtractionError::NoTextLayer,
                SourceType::Text => ExtractionError::Empty,
            }
            .into());
        }

        info!(
            "Extracted {} characters from {} ({}, {} page(s))",
            text.chars().count(),
            filename,
            source_type,
            pages
        );
        Ok(Document::new(text, filename, source_type, pages))
    }

    /// Read a file from disk and load it.
    pub fn load_path(&self, path: &Path) -> Result<Document> {
        if let Some(limit) = self.max_bytes {
            let size = std::fs::metadata(path)?.len();
            if size > limit {
                return Err(ExtractionError::TooLarge { size, limit }.into());
            }
        }
        let bytes = std::fs::read(path)?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document");
        self.load_bytes(&bytes, filename, None)
    }
}

/// Load a document from bytes with no size limit.
pub fn load_bytes(bytes: &[u8], filename: &str, declared_mime: Option<&str>) -> Result<Document> {
    Loader::default().load_bytes(bytes, filename, declared_mime)
}

/// Load a document from disk with no size limit.
pub fn load_path(path: &Path) -> Result<Document> {
    Loader::default().load_path(path)
}

fn decode_text(bytes: &[u8]) -> std::result::Result<String, ExtractionError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| ExtractionError::NotUtf8)
}

/// Extract PDF text page by page, joining pages with newlines.
fn extract_pdf(bytes: &[u8]) -> std::result::Result<(String, usize), ExtractionError> {
    if !bytes.starts_with(b"%PDF") {
        return Err(ExtractionError::Pdf("missing %PDF header".into()));
    }

    // pdf-extract panics on some malformed inputs rather than returning Err.
    catch_unwind(AssertUnwindSafe(|| extract_pages(bytes))).map_err(|_| {
        warn!("PDF parser panicked");
        ExtractionError::Pdf("PDF parser panicked".into())
    })?
}

fn extract_pages(bytes: &[u8]) -> std::result::Result<(String, usize), ExtractionError> {
    let doc = pdf_extract::Document::load_mem(bytes)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;
    if doc.is_encrypted() {
        return Err(ExtractionError::Pdf("encrypted PDFs are not supported".into()));
    }

    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
    let mut pages = Vec::with_capacity(page_numbers.len());
    for page_num in &page_numbers {
        let mut page = String::new();
        {
            let mut output = pdf_extract::PlainTextOutput::new(&mut page);
            pdf_extract::output_doc_page(&doc, &mut output, *page_num)
                .map_err(|e| ExtractionError::Pdf(format!("page {}: {}", page_num, e)))?;
        }
        pages.push(page.trim().to_string());
    }
    debug!("Extracted {} PDF page(s)", pages.len());

    Ok((pages.join("\n"), page_numbers.len().max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use policybriefly_core::Error;
    use std::io::Write;

    /// Build a minimal PDF with one page per content stream. Pages share a
    /// Helvetica font resource named `/F1`.
    fn build_pdf(page_streams: &[&str]) -> Vec<u8> {
        let kids: Vec<String> = (0..page_streams.len())
            .map(|i| format!("{} 0 R", 4 + 2 * i))
            .collect();
        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                page_streams.len()
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ];
        for (i, stream) in page_streams.iter().enumerate() {
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
                 /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
                5 + 2 * i
            ));
            objects.push(format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                stream.len(),
                stream
            ));
        }

        let mut out = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }
        let xref_at = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for off in offsets {
            out.extend_from_slice(format!("{:010} 00000 n \n", off).as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_at
            )
            .as_bytes(),
        );
        out
    }

    /// One page with an empty content stream, i.e. nothing to extract.
    fn blank_pdf() -> Vec<u8> {
        build_pdf(&[""])
    }

    #[test]
    fn test_load_text() {
        let doc = load_bytes(b"SUMMARY: A rule.", "rule.txt", None).unwrap();
        assert_eq!(doc.text(), "SUMMARY: A rule.");
        assert_eq!(doc.source_type(), SourceType::Text);
        assert_eq!(doc.filename(), "rule.txt");
    }

    #[test]
    fn test_strips_utf8_bom() {
        let doc = load_bytes(b"\xEF\xBB\xBFHello", "bom.txt", None).unwrap();
        assert_eq!(doc.text(), "Hello");
    }

    #[test]
    fn test_empty_input_fails() {
        let err = load_bytes(b"", "empty.txt", None).unwrap_err();
        assert!(matches!(err, Error::Extraction(ExtractionError::Empty)));

        let err = load_bytes(b"  \n\t ", "blank.txt", None).unwrap_err();
        assert!(matches!(err, Error::Extraction(ExtractionError::Empty)));
    }

    #[test]
    fn test_invalid_utf8_fails() {
        let err = load_bytes(&[0x66, 0x6f, 0xff, 0xfe], "bad.txt", None).unwrap_err();
        assert!(matches!(err, Error::Extraction(ExtractionError::NotUtf8)));
    }

    #[test]
    fn test_pdf_without_text_layer_fails() {
        let err = load_bytes(&blank_pdf(), "scan.pdf", Some("application/pdf")).unwrap_err();
        assert!(
            matches!(err, Error::Extraction(ExtractionError::NoTextLayer)),
            "got {:?}",
            err
        );
    }

    #[test]
    fn test_pdf_pages_joined_with_newline() {
        let pdf = build_pdf(&[
            "BT /F1 12 Tf 72 720 Td (Alpha) Tj ET",
            "BT /F1 12 Tf 72 720 Td (Bravo) Tj ET",
        ]);
        let doc = load_bytes(&pdf, "rule.pdf", None).unwrap();
        assert_eq!(doc.source_type(), SourceType::Pdf);
        assert_eq!(doc.pages(), 2);
        assert_eq!(doc.text(), "Alpha\nBravo");
        assert_eq!(doc.filename(), "rule.pdf");
    }

    #[test]
    fn test_garbage_pdf_fails() {
        let err = load_bytes(b"%PDF-1.7 not really", "broken.pdf", None).unwrap_err();
        assert!(matches!(err, Error::Extraction(ExtractionError::Pdf(_))));

        let err = load_bytes(b"hello", "fake.pdf", None).unwrap_err();
        assert!(matches!(err, Error::Extraction(ExtractionError::Pdf(_))));
    }

    #[test]
    fn test_size_limit() {
        let err = Loader::new(4).load_bytes(b"too long", "a.txt", None).unwrap_err();
        assert!(matches!(
            err,
            Error::Extraction(ExtractionError::TooLarge { size: 8, limit: 4 })
        ));
    }

    #[test]
    fn test_load_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.txt");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "The deadline is January 15, 2025.").unwrap();

        let doc = load_path(&path).unwrap();
        assert_eq!(doc.filename(), "policy.txt");
        assert!(doc.text().contains("January 15, 2025"));
    }

    #[test]
    fn test_load_missing_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_path(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
