//! Settings for the remote summarization call.

use std::time::Duration;

use policybriefly_core::{BrieflyConfig, ProviderKind};

/// Characters of the document sent to the model.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 2000;

pub const SUMMARY_INSTRUCTION: &str =
    "Summarize this policy document in plain business language, focusing on practical impacts:";

#[derive(Debug, Clone)]
pub struct InferenceSettings {
    pub provider: ProviderKind,
    pub url: String,
    pub model: String,
    /// Used when a run supplies no credential of its own.
    pub default_token: Option<String>,
    pub timeout: Duration,
    pub max_input_chars: usize,
}

impl InferenceSettings {
    pub fn from_config(config: &BrieflyConfig) -> Self {
        Self {
            provider: config.provider,
            url: config.inference_url.clone(),
            model: config.model.clone(),
            default_token: config.api_token.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }

    /// Pick the run's credential, falling back to the configured default.
    /// Blank tokens count as absent.
    pub fn resolve_token<'a>(&'a self, run_token: Option<&'a str>) -> Option<&'a str> {
        run_token
            .filter(|t| !t.trim().is_empty())
            .or(self.default_token.as_deref())
            .filter(|t| !t.trim().is_empty())
    }

    /// Full request URL. Hugging Face addresses the model in the path.
    pub fn endpoint(&self) -> String {
        match self.provider {
            ProviderKind::HuggingFace => {
                format!("{}/{}", self.url.trim_end_matches('/'), self.model)
            }
            ProviderKind::OpenAI => self.url.clone(),
        }
    }
}
