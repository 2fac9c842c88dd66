//! Runtime configuration, read from the environment.
//!
//! Nothing here is persisted: the server and CLI build a [`BrieflyConfig`]
//! at startup and per-run options (length tier, toggles, credential) travel
//! with each request.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_PORT: u16 = 3004;
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 20;
pub const DEFAULT_MAX_SESSIONS: usize = 64;

pub const DEFAULT_HF_BASE_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_HF_MODEL: &str = "facebook/bart-large-cnn";
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Remote inference API flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Hugging Face hosted inference (`POST {base}/{model}`).
    HuggingFace,
    /// Any OpenAI-compatible chat completions endpoint.
    OpenAI,
}

impl ProviderKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "huggingface" | "hf" => Some(Self::HuggingFace),
            "openai" => Some(Self::OpenAI),
            _ => None,
        }
    }

    pub fn default_url(&self) -> &'static str {
        match self {
            Self::HuggingFace => DEFAULT_HF_BASE_URL,
            Self::OpenAI => DEFAULT_OPENAI_URL,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::HuggingFace => DEFAULT_HF_MODEL,
            Self::OpenAI => DEFAULT_OPENAI_MODEL,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::HuggingFace => write!(f, "huggingface"),
            ProviderKind::OpenAI => write!(f, "openai"),
        }
    }
}

/// Top-level PolicyBriefly configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrieflyConfig {
    /// HTTP server port.
    pub port: u16,
    pub provider: ProviderKind,
    /// Endpoint URL. For Hugging Face this is the models base URL.
    pub inference_url: String,
    pub model: String,
    /// Default credential; a per-run token takes precedence.
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    /// Client-side timeout for the remote summarization call.
    pub timeout_secs: u64,
    pub max_upload_bytes: u64,
    /// Upper bound on in-memory sessions; the oldest is evicted past it.
    pub max_sessions: usize,
    /// Optional JSON file overriding the built-in heuristic profile.
    pub heuristics_path: Option<PathBuf>,
}

impl Default for BrieflyConfig {
    fn default() -> Self {
        let provider = ProviderKind::HuggingFace;
        Self {
            port: DEFAULT_PORT,
            provider,
            inference_url: provider.default_url().to_string(),
            model: provider.default_model().to_string(),
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
            max_sessions: DEFAULT_MAX_SESSIONS,
            heuristics_path: None,
        }
    }
}

impl BrieflyConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match var("POLICYBRIEFLY_PROVIDER") {
            Some(raw) => ProviderKind::parse(&raw)
                .ok_or_else(|| Error::Config(format!("unknown inference provider: {}", raw)))?,
            None => ProviderKind::HuggingFace,
        };

        let port = var("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let timeout_secs = var("POLICYBRIEFLY_TIMEOUT_SECS")
            .and_then(|t| t.parse().ok())
            .filter(|t| *t > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let max_upload_mb: u64 = var("POLICYBRIEFLY_MAX_UPLOAD_MB")
            .and_then(|m| m.parse().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_MB);
        let max_upload_bytes = max_upload_mb.checked_mul(1024 * 1024).ok_or_else(|| {
            Error::Config(format!("upload limit too large: {} MB", max_upload_mb))
        })?;
        let max_sessions = var("POLICYBRIEFLY_MAX_SESSIONS")
            .and_then(|m| m.parse().ok())
            .filter(|m| *m > 0)
            .unwrap_or(DEFAULT_MAX_SESSIONS);

        let api_token = var("POLICYBRIEFLY_API_TOKEN").or_else(|| match provider {
            ProviderKind::HuggingFace => var("HF_TOKEN"),
            ProviderKind::OpenAI => var("OPENAI_API_KEY"),
        });

        Ok(Self {
            port,
            provider,
            inference_url: var("POLICYBRIEFLY_INFERENCE_URL")
                .unwrap_or_else(|| provider.default_url().to_string()),
            model: var("POLICYBRIEFLY_MODEL")
                .unwrap_or_else(|| provider.default_model().to_string()),
            api_token,
            timeout_secs,
            max_upload_bytes,
            max_sessions,
            heuristics_path: var("POLICYBRIEFLY_HEURISTICS").map(PathBuf::from),
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_token.is_some()
    }
}
