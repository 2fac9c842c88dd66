//! Per-run options and the aggregated analysis result.

use chrono::{DateTime, Utc};
use policybriefly_ingest::{Document, DocumentInfo};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bias::{detect_bias, BiasVerdict};
use crate::facts::{extract_key_facts, KeyFacts};
use crate::impact::{score_impact, ImpactScores};
use crate::profile::HeuristicProfile;
use crate::sections::{extract_key_sections, KeySections};
use crate::summary::{Summary, SummaryTier};

fn default_true() -> bool {
    true
}

/// User-chosen options for one analysis run. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    #[serde(default)]
    pub length: SummaryTier,
    #[serde(default = "default_true", rename = "includeBias")]
    pub include_bias: bool,
    #[serde(default = "default_true", rename = "includeImpact")]
    pub include_impact: bool,
    /// Credential for the remote model; overrides the server default.
    #[serde(default, rename = "apiToken", skip_serializing)]
    pub api_token: Option<String>,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            length: SummaryTier::default(),
            include_bias: true,
            include_impact: true,
            api_token: None,
        }
    }
}

/// Everything one run produced. Read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub document: DocumentInfo,
    pub summary: Summary,
    /// `None` when impact scoring was switched off.
    pub impact: Option<ImpactScores>,
    /// `None` when bias detection was switched off.
    pub bias: Option<BiasVerdict>,
    pub key_facts: KeyFacts,
    pub sections: KeySections,
    pub analyzed_at: DateTime<Utc>,
}

/// Runs the heuristic analyses with a fixed profile.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    profile: HeuristicProfile,
}

impl Analyzer {
    pub fn new(profile: HeuristicProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &HeuristicProfile {
        &self.profile
    }

    pub fn impact(&self, text: &str) -> ImpactScores {
        score_impact(text, &self.profile.impact)
    }

    pub fn bias(&self, text: &str) -> BiasVerdict {
        detect_bias(text, &self.profile.bias)
    }

    pub fn key_facts(&self, text: &str) -> KeyFacts {
        extract_key_facts(text, &self.profile.facts)
    }

    /// Combine an already-produced summary with the heuristic analyses.
    ///
    /// Each analysis reads only the document text, so their order is
    /// irrelevant.
    pub fn assemble(
        &self,
        document: &Document,
        options: &AnalysisOptions,
        summary: Summary,
    ) -> AnalysisResult {
        let text = document.text();
        let impact = options.include_impact.then(|| self.impact(text));
        let bias = options.include_bias.then(|| self.bias(text));
        let key_facts = self.key_facts(text);
        let sections = extract_key_sections(text);

        debug!(
            "Assembled analysis for {}: {} date(s), {} stakeholder(s)",
            document.filename(),
            key_facts.dates.len(),
            key_facts.stakeholders.len()
        );

        AnalysisResult {
            document: document.info(),
            summary,
            impact,
            bias,
            key_facts,
            sections,
            analyzed_at: Utc::now(),
        }
    }
}
