//! Keyword-density impact scoring along four fixed dimensions.

use serde::{Deserialize, Serialize};

use crate::profile::{ImpactProfile, TermCategory};
use crate::text::count_terms;

/// The four impact dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactDimension {
    ComplianceComplexity,
    CostImpact,
    TimelineUrgency,
    ScopeBreadth,
}

impl ImpactDimension {
    pub const ALL: [ImpactDimension; 4] = [
        ImpactDimension::ComplianceComplexity,
        ImpactDimension::CostImpact,
        ImpactDimension::TimelineUrgency,
        ImpactDimension::ScopeBreadth,
    ];

    /// Human-readable title, e.g. "Compliance Complexity".
    pub fn title(&self) -> &'static str {
        match self {
            Self::ComplianceComplexity => "Compliance Complexity",
            Self::CostImpact => "Cost Impact",
            Self::TimelineUrgency => "Timeline Urgency",
            Self::ScopeBreadth => "Scope Breadth",
        }
    }

    fn category<'a>(&self, profile: &'a ImpactProfile) -> &'a TermCategory {
        match self {
            Self::ComplianceComplexity => &profile.compliance_complexity,
            Self::CostImpact => &profile.cost_impact,
            Self::TimelineUrgency => &profile.timeline_urgency,
            Self::ScopeBreadth => &profile.scope_breadth,
        }
    }
}

/// Qualitative band for a 0–100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    pub fn from_score(score: u8, profile: &ImpactProfile) -> Self {
        if score >= profile.high_threshold {
            Self::High
        } else if score >= profile.medium_threshold {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpactLevel::Low => write!(f, "Low"),
            ImpactLevel::Medium => write!(f, "Medium"),
            ImpactLevel::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactScore {
    pub dimension: ImpactDimension,
    /// Always within 0..=100.
    pub score: u8,
    pub label: ImpactLevel,
    /// Raw keyword hits behind the score.
    pub hits: usize,
}

/// Scores for all four dimensions, in [`ImpactDimension::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactScores {
    pub scores: Vec<ImpactScore>,
}

impl ImpactScores {
    pub fn get(&self, dimension: ImpactDimension) -> Option<&ImpactScore> {
        self.scores.iter().find(|s| s.dimension == dimension)
    }

    /// Chart-ready `(title, percentage)` pairs for a radar or bar chart.
    pub fn radar_series(&self) -> Vec<(&'static str, u8)> {
        self.scores
            .iter()
            .map(|s| (s.dimension.title(), s.score))
            .collect()
    }
}

/// Score `text` on all four dimensions. Pure; empty text scores zero.
pub fn score_impact(text: &str, profile: &ImpactProfile) -> ImpactScores {
    let text_lower = text.to_lowercase();
    let words = text.split_whitespace().count();
    let units = (words / profile.words_per_unit.max(1)).max(1) as f64;

    let scores = ImpactDimension::ALL
        .iter()
        .map(|&dimension| {
            let category = dimension.category(profile);
            let hits = count_terms(&text_lower, &category.terms);
            let saturation = category.saturation * units;
            let ratio = if saturation > 0.0 {
                (hits as f64 / saturation).min(1.0)
            } else {
                0.0
            };
            let score = (ratio * 100.0).round().clamp(0.0, 100.0) as u8;
            ImpactScore {
                dimension,
                score,
                label: ImpactLevel::from_score(score, profile),
                hits,
            }
        })
        .collect();

    ImpactScores { scores }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> ImpactProfile {
        ImpactProfile::default()
    }

    #[test]
    fn test_empty_text_scores_zero_low() {
        let scores = score_impact("", &profile());
        assert_eq!(scores.scores.len(), 4);
        for s in &scores.scores {
            assert_eq!(s.score, 0);
            assert_eq!(s.label, ImpactLevel::Low);
        }
    }

    #[test]
    fn test_cost_saturates_at_100() {
        let text = "cost fee penalty fine expense budget cost cost";
        let scores = score_impact(text, &profile());
        let cost = scores.get(ImpactDimension::CostImpact).unwrap();
        assert_eq!(cost.hits, 8);
        assert_eq!(cost.score, 100);
        assert_eq!(cost.label, ImpactLevel::High);
    }

    #[test]
    fn test_partial_score_and_label() {
        // 4 compliance hits out of a saturation of 10.
        let text = "Firms must comply. The requirement is a standard regulation.";
        let scores = score_impact(text, &profile());
        let c = scores.get(ImpactDimension::ComplianceComplexity).unwrap();
        assert_eq!(c.hits, 4);
        assert_eq!(c.score, 40);
        assert_eq!(c.label, ImpactLevel::Medium);
    }

    #[test]
    fn test_long_documents_are_length_normalized() {
        let filler = "word ".repeat(1500);
        let text = format!("cost fee penalty fine expense {}", filler);
        let scores = score_impact(&text, &profile());
        // 1505 words -> 3 units -> saturation 15, 5 hits -> 33.
        assert_eq!(scores.get(ImpactDimension::CostImpact).unwrap().score, 33);
    }

    #[test]
    fn test_scores_always_bounded() {
        let texts = [
            "all all all all all all all all all all all all all all",
            "immediately within days effective deadline within days",
            "ÉNORMES coûts — fee fee fee",
            "\n\n\t",
        ];
        for t in texts {
            for s in score_impact(t, &profile()).scores {
                assert!(s.score <= 100);
            }
        }
    }

    #[test]
    fn test_radar_series_order() {
        let series = score_impact("", &profile()).radar_series();
        let titles: Vec<&str> = series.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            titles,
            vec!["Compliance Complexity", "Cost Impact", "Timeline Urgency", "Scope Breadth"]
        );
    }
}
