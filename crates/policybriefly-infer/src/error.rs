//! Remote inference failures. Always recovered by the local fallback.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    #[error("no API credential configured")]
    NotConfigured,

    #[error("nothing to summarize")]
    EmptyInput,

    #[error("request failed: {0}")]
    Network(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("credential rejected (HTTP {0})")]
    Unauthorized(u16),

    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("model returned an empty summary")]
    Empty,
}
