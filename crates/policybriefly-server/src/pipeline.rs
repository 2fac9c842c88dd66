//! One analysis run: remote-or-fallback summary, then the heuristic analyses.

use policybriefly_analyze::{AnalysisOptions, AnalysisResult, Analyzer, HeuristicProfile};
use policybriefly_core::{BrieflyConfig, Result};
use policybriefly_infer::{InferenceSettings, Summarizer};
use policybriefly_ingest::Document;
use tracing::info;

/// Summarizer plus analyzer, shared by the HTTP API and the CLI.
#[derive(Debug, Clone)]
pub struct Pipeline {
    analyzer: Analyzer,
    summarizer: Summarizer,
}

impl Pipeline {
    pub fn new(analyzer: Analyzer, summarizer: Summarizer) -> Self {
        Self {
            analyzer,
            summarizer,
        }
    }

    /// Build from configuration, loading the heuristics override if one is set.
    pub fn from_config(config: &BrieflyConfig) -> Result<Self> {
        let profile = match &config.heuristics_path {
            Some(path) => HeuristicProfile::load(path)?,
            None => HeuristicProfile::default(),
        };
        let summarizer = Summarizer::new(InferenceSettings::from_config(config))?;
        Ok(Self::new(Analyzer::new(profile), summarizer))
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn summarizer(&self) -> &Summarizer {
        &self.summarizer
    }

    /// Run every requested analysis over `document`.
    ///
    /// Never fails: a remote summarization problem degrades to the
    /// extractive summary and is reported in `summary.fallback_reason`.
    pub async fn run(&self, document: &Document, options: &AnalysisOptions) -> AnalysisResult {
        info!(
            "Analyzing {} ({} chars, length={}, bias={}, impact={})",
            document.filename(),
            document.char_count(),
            options.length,
            options.include_bias,
            options.include_impact
        );
        let summary = self
            .summarizer
            .summarize(document.text(), options.length, options.api_token.as_deref())
            .await;
        let result = self.analyzer.assemble(document, options, summary);
        info!(
            "Analysis of {} complete (summary: {})",
            document.filename(),
            if result.summary.is_fallback() { "rule-based" } else { "remote" }
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use policybriefly_analyze::SummaryTier;
    use policybriefly_ingest::sample::epa_sample;

    fn offline() -> Pipeline {
        let mut config = BrieflyConfig::default();
        config.api_token = None;
        config.inference_url = "http://127.0.0.1:9/models".into();
        Pipeline::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn test_run_without_credential_uses_fallback() {
        let doc = epa_sample();
        let result = offline().run(&doc, &AnalysisOptions::default()).await;

        assert!(result.summary.is_fallback());
        assert!(!result.summary.text.is_empty());
        assert!(result.impact.is_some());
        assert!(result.bias.is_some());
        assert_eq!(result.document.filename, doc.filename());
    }

    #[tokio::test]
    async fn test_toggles_skip_analyses() {
        let options = AnalysisOptions {
            length: SummaryTier::Short,
            include_bias: false,
            include_impact: false,
            api_token: None,
        };
        let result = offline().run(&epa_sample(), &options).await;
        assert!(result.impact.is_none());
        assert!(result.bias.is_none());
        assert_eq!(result.summary.tier, SummaryTier::Short);
    }

    #[test]
    fn test_missing_heuristics_file_is_an_error() {
        let mut config = BrieflyConfig::default();
        config.heuristics_path = Some("/nonexistent/heuristics.json".into());
        assert!(Pipeline::from_config(&config).is_err());
    }
}
