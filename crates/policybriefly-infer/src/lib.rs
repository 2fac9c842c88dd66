//! Remote summarization with a deterministic local fallback.
//!
//! The remote call goes to a hosted model API; no local model is required.
//! Any failure (network, timeout, auth, malformed body) is captured as an
//! [`InferenceError`] and the extractive summarizer takes over.

pub mod config;
pub mod error;
pub mod providers;
pub mod summarizer;
pub mod types;

pub use config::InferenceSettings;
pub use error::InferenceError;
pub use providers::InferenceClient;
pub use summarizer::Summarizer;
