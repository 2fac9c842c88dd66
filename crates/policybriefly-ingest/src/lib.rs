//! PolicyBriefly Ingest — turns uploaded bytes into an immutable [`Document`].

pub mod document;
pub mod file;
pub mod sample;

pub use document::{Document, DocumentInfo, SourceType};
pub use file::{load_bytes, load_path, Loader};
