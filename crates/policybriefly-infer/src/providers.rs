//! Hosted model API calls.
//!
//! Hugging Face and OpenAI-compatible endpoints differ only in request body
//! and response shape; transport and status handling are shared.

use policybriefly_core::{Error, ProviderKind};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;

use crate::config::InferenceSettings;
use crate::error::InferenceError;
use crate::types::{ChatCompletionRequest, ChatMessage, HfOptions, HfParameters, HfRequest};

const MAX_ERROR_BODY_CHARS: usize = 200;

/// HTTP client bound to one provider/model with a fixed timeout.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    http: Client,
    settings: InferenceSettings,
}

impl InferenceClient {
    pub fn new(settings: InferenceSettings) -> policybriefly_core::Result<Self> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| Error::Http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { http, settings })
    }

    pub fn settings(&self) -> &InferenceSettings {
        &self.settings
    }

    /// Ask the model to follow `instruction` on `input`.
    pub async fn generate(
        &self,
        instruction: &str,
        input: &str,
        max_new_tokens: usize,
        token: &str,
    ) -> Result<String, InferenceError> {
        let endpoint = self.settings.endpoint();
        debug!(
            "Calling {} at {} with model {} ({} input chars)",
            self.settings.provider,
            endpoint,
            self.settings.model,
            input.chars().count()
        );

        match self.settings.provider {
            ProviderKind::HuggingFace => {
                let prompt = format!("{}\n\n{}", instruction, input);
                let body = HfRequest {
                    inputs: &prompt,
                    parameters: HfParameters { max_new_tokens },
                    options: HfOptions {
                        wait_for_model: true,
                    },
                };
                let value = self
                    .send(self.http.post(&endpoint).bearer_auth(token).json(&body))
                    .await?;
                clean_generated(&parse_hf_response(&value)?, &prompt)
            }
            ProviderKind::OpenAI => {
                let body = ChatCompletionRequest {
                    model: &self.settings.model,
                    messages: vec![
                        ChatMessage::new("system", instruction),
                        ChatMessage::new("user", input),
                    ],
                    max_tokens: max_new_tokens,
                    temperature: 0.3,
                };
                let value = self
                    .send(self.http.post(&endpoint).bearer_auth(token).json(&body))
                    .await?;
                clean_generated(&parse_openai_response(&value)?, "")
            }
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, InferenceError> {
        let response = request.send().await.map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(InferenceError::Unauthorized(status.as_u16()));
        }

        let is_plain_text = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("text/plain"));
        let body = response.text().await.map_err(|e| self.map_transport(e))?;

        if !status.is_success() {
            let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => Ok(value),
            Err(_) if is_plain_text => Ok(Value::String(body)),
            Err(e) => Err(InferenceError::Malformed(format!("invalid JSON: {}", e))),
        }
    }

    fn map_transport(&self, e: reqwest::Error) -> InferenceError {
        if e.is_timeout() {
            InferenceError::Timeout(self.settings.timeout)
        } else {
            InferenceError::Network(e.to_string())
        }
    }
}

/// Extract generated text from the shapes Hugging Face returns:
/// `[{"generated_text": ..}]`, `[{"summary_text": ..}]`, a bare object with
/// either key, or a JSON string.
pub fn parse_hf_response(value: &Value) -> Result<String, InferenceError> {
    fn generated(v: &Value) -> Option<&str> {
        v.get("generated_text")
            .or_else(|| v.get("summary_text"))
            .and_then(|t| t.as_str())
    }

    let text = match value {
        Value::String(s) => Some(s.as_str()),
        Value::Array(items) => items.first().and_then(generated),
        Value::Object(_) => {
            if let Some(err) = value.get("error").and_then(|e| e.as_str()) {
                return Err(InferenceError::Malformed(format!("model error: {}", err)));
            }
            generated(value)
        }
        _ => None,
    };

    text.map(str::to_string).ok_or_else(|| {
        InferenceError::Malformed("no generated_text or summary_text in response".into())
    })
}

/// Extract `choices[0].message.content` from a chat completion.
pub fn parse_openai_response(value: &Value) -> Result<String, InferenceError> {
    value["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| InferenceError::Malformed("no choices[0].message.content in response".into()))
}

/// Trim output and drop an echoed prompt. Empty output is an error.
fn clean_generated(raw: &str, prompt: &str) -> Result<String, InferenceError> {
    let trimmed = raw.trim();
    let text = if prompt.is_empty() {
        trimmed
    } else {
        trimmed.strip_prefix(prompt.trim()).unwrap_or(trimmed).trim()
    };
    if text.is_empty() {
        Err(InferenceError::Empty)
    } else {
        Ok(text.to_string())
    }
}
