//! Error types for PolicyBriefly.

use thiserror::Error;

/// Why a document yielded no usable text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("document is empty")]
    Empty,

    #[error("document is not valid UTF-8 text")]
    NotUtf8,

    #[error("PDF contains no extractable text layer (scanned images?)")]
    NoTextLayer,

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("document is too large: {size} bytes (limit {limit})")]
    TooLarge { size: u64, limit: u64 },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

pub type Result<T> = std::result::Result<T, Error>;
