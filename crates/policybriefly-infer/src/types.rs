//! Request bodies for the supported inference APIs.

use serde::{Deserialize, Serialize};

/// Hugging Face Inference API request.
#[derive(Debug, Clone, Serialize)]
pub struct HfRequest<'a> {
    pub inputs: &'a str,
    pub parameters: HfParameters,
    pub options: HfOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct HfParameters {
    pub max_new_tokens: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HfOptions {
    pub wait_for_model: bool,
}

/// Chat message in an OpenAI-compatible request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

/// OpenAI-compatible chat completions request (non-streaming).
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: usize,
    pub temperature: f64,
}
