//! Keyword lists and thresholds used by the heuristic analyzers.
//!
//! These are uncalibrated demo heuristics, so they live here as data rather
//! than inside the scoring code. A JSON file can override any subset of them;
//! missing fields keep their defaults.

use std::path::Path;

use policybriefly_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// A keyword category and the hit count at which it saturates to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermCategory {
    pub terms: Vec<String>,
    pub saturation: f64,
}

impl TermCategory {
    fn new(terms: &[&str], saturation: f64) -> Self {
        Self {
            terms: terms.iter().map(|t| t.to_string()).collect(),
            saturation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactProfile {
    pub compliance_complexity: TermCategory,
    pub cost_impact: TermCategory,
    pub timeline_urgency: TermCategory,
    pub scope_breadth: TermCategory,
    /// Saturation counts scale up by one unit per this many words.
    pub words_per_unit: usize,
    pub high_threshold: u8,
    pub medium_threshold: u8,
}

impl Default for ImpactProfile {
    fn default() -> Self {
        Self {
            compliance_complexity: TermCategory::new(
                &["requirement", "shall", "must", "compliance", "regulation", "standard"],
                10.0,
            ),
            cost_impact: TermCategory::new(
                &["cost", "fee", "penalty", "fine", "expense", "budget"],
                5.0,
            ),
            timeline_urgency: TermCategory::new(
                &["immediate", "within", "days", "effective", "deadline"],
                8.0,
            ),
            scope_breadth: TermCategory::new(
                &["all", "every", "entire", "comprehensive", "broad", "wide"],
                6.0,
            ),
            words_per_unit: 500,
            high_threshold: 70,
            medium_threshold: 40,
        }
    }
}

/// One side of a bias axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasSide {
    pub label: String,
    pub terms: Vec<String>,
    /// Finding reported when this side dominates.
    pub detail: String,
}

/// Two opposing framing vocabularies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasAxisProfile {
    pub name: String,
    pub left: BiasSide,
    pub right: BiasSide,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiasProfile {
    pub axes: Vec<BiasAxisProfile>,
    /// A side dominates when its count exceeds the other's times this ratio.
    pub ratio_threshold: f64,
    /// Minimum hits on the dominant side before an axis can be flagged.
    pub min_hits: usize,
    pub max_evidence: usize,
}

impl Default for BiasProfile {
    fn default() -> Self {
        let side = |label: &str, terms: &[&str], detail: &str| BiasSide {
            label: label.to_string(),
            terms: terms.iter().map(|t| t.to_string()).collect(),
            detail: detail.to_string(),
        };
        Self {
            axes: vec![
                BiasAxisProfile {
                    name: "language".into(),
                    left: side(
                        "positive",
                        &["benefit", "improve", "enhance", "opportunity", "growth"],
                        "Document uses predominantly positive language",
                    ),
                    right: side(
                        "negative",
                        &["burden", "costly", "difficult", "challenge", "restrict"],
                        "Document uses predominantly negative language",
                    ),
                },
                BiasAxisProfile {
                    name: "stakeholder".into(),
                    left: side(
                        "business",
                        &["industry", "business", "company", "economic"],
                        "Document appears to favor business interests",
                    ),
                    right: side(
                        "public",
                        &["citizen", "public", "community", "environmental"],
                        "Document appears to favor public interests",
                    ),
                },
            ],
            ratio_threshold: 2.0,
            min_hits: 1,
            max_evidence: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactsProfile {
    pub max_dates: usize,
    pub max_stakeholders: usize,
    pub max_stakeholder_groups: usize,
    pub min_stakeholder_chars: usize,
}

impl Default for FactsProfile {
    fn default() -> Self {
        Self {
            max_dates: 5,
            max_stakeholders: 8,
            max_stakeholder_groups: 8,
            min_stakeholder_chars: 5,
        }
    }
}

/// Every tunable the analyzers read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicProfile {
    pub impact: ImpactProfile,
    pub bias: BiasProfile,
    pub facts: FactsProfile,
}

impl HeuristicProfile {
    /// Load a profile from a JSON file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let profile: HeuristicProfile = serde_json::from_str(&raw)?;
        profile.validate()?;
        info!("Loaded heuristic profile from {}", path.display());
        Ok(profile)
    }

    pub fn validate(&self) -> Result<()> {
        let impact = &self.impact;
        for (name, cat) in [
            ("compliance_complexity", &impact.compliance_complexity),
            ("cost_impact", &impact.cost_impact),
            ("timeline_urgency", &impact.timeline_urgency),
            ("scope_breadth", &impact.scope_breadth),
        ] {
            if !(cat.saturation > 0.0) {
                return Err(Error::Config(format!("{}: saturation must be positive", name)));
            }
        }
        if impact.words_per_unit == 0 {
            return Err(Error::Config("words_per_unit must be positive".into()));
        }
        if impact.medium_threshold > impact.high_threshold || impact.high_threshold > 100 {
            return Err(Error::Config(
                "impact thresholds must satisfy medium <= high <= 100".into(),
            ));
        }
        if !(self.bias.ratio_threshold >= 1.0) {
            return Err(Error::Config("bias ratio_threshold must be >= 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        HeuristicProfile::default().validate().unwrap();
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, r#"{"facts": {"max_dates": 2}, "bias": {"ratio_threshold": 3.0}}"#)
            .unwrap();

        let profile = HeuristicProfile::load(&path).unwrap();
        assert_eq!(profile.facts.max_dates, 2);
        assert_eq!(profile.facts.max_stakeholders, 8);
        assert_eq!(profile.bias.ratio_threshold, 3.0);
        assert_eq!(profile.bias.axes.len(), 2);
        assert_eq!(profile.impact, ImpactProfile::default());
    }

    #[test]
    fn test_rejects_bad_thresholds() {
        let mut profile = HeuristicProfile::default();
        profile.impact.cost_impact.saturation = 0.0;
        assert!(matches!(profile.validate(), Err(Error::Config(_))));

        let mut profile = HeuristicProfile::default();
        profile.impact.medium_threshold = 90;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_malformed_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(HeuristicProfile::load(&path), Err(Error::Json(_))));
    }
}
