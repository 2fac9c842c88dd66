//! Summary types and the local extractive fallback summarizer.

use serde::{Deserialize, Serialize};

use crate::sections::extract_key_sections;
use crate::text::{normalize_whitespace, split_sentences, truncate_chars};

/// Requested summary length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryTier {
    Short,
    #[default]
    Medium,
    Detailed,
}

impl SummaryTier {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "detailed" => Some(Self::Detailed),
            _ => None,
        }
    }

    /// Sentences kept by the extractive fallback.
    pub fn sentences(&self) -> usize {
        match self {
            Self::Short => 2,
            Self::Medium => 3,
            Self::Detailed => 6,
        }
    }

    /// Character cap for the extractive fallback.
    pub fn max_chars(&self) -> usize {
        match self {
            Self::Short => 250,
            Self::Medium => 400,
            Self::Detailed => 800,
        }
    }

    /// Generation budget passed to the remote model.
    pub fn max_new_tokens(&self) -> usize {
        match self {
            Self::Short => 100,
            Self::Medium => 200,
            Self::Detailed => 400,
        }
    }
}

impl std::fmt::Display for SummaryTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryTier::Short => write!(f, "short"),
            SummaryTier::Medium => write!(f, "medium"),
            SummaryTier::Detailed => write!(f, "detailed"),
        }
    }
}

/// Which path produced a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SummarySource {
    Remote { provider: String, model: String },
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub text: String,
    pub tier: SummaryTier,
    pub source: SummarySource,
    /// Why the remote path was not used, when it wasn't.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl Summary {
    pub fn is_fallback(&self) -> bool {
        self.source == SummarySource::Fallback
    }
}

const MIN_SENTENCE_CHARS: usize = 20;
const EMPTY_DOCUMENT_SUMMARY: &str = "The document contains no summarizable text.";

/// Rule-based summary. Never returns an empty string.
///
/// Prefers the document's own `SUMMARY:` section, then its first substantive
/// sentences, then the raw text itself.
pub fn fallback_summary(text: &str, tier: SummaryTier) -> String {
    let max_chars = tier.max_chars();

    if let Some(section) = extract_key_sections(text).summary {
        return format!("Key Points: {}", truncate_chars(&section, max_chars));
    }

    let key_sentences: Vec<String> = split_sentences(text)
        .into_iter()
        .map(normalize_whitespace)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .take(tier.sentences())
        .collect();

    let summary = if key_sentences.is_empty() {
        normalize_whitespace(text)
    } else {
        key_sentences.join(" ")
    };

    if summary.is_empty() {
        return EMPTY_DOCUMENT_SUMMARY.to_string();
    }
    truncate_chars(&summary, max_chars)
}
