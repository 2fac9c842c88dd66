//! Framing-imbalance detection between opposing keyword vocabularies.

use serde::{Deserialize, Serialize};

use crate::profile::{BiasAxisProfile, BiasProfile};
use crate::text::{contains_any, count_terms, normalize_whitespace, split_sentences};

/// Which side of an axis dominates, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Leaning {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasAxisResult {
    pub axis: String,
    pub left_label: String,
    pub right_label: String,
    pub left_count: usize,
    pub right_count: usize,
    /// `(max - min) / (max + min)`, 0 when neither side appears.
    pub imbalance: f64,
    pub flagged: bool,
    pub leaning: Option<Leaning>,
}

impl BiasAxisResult {
    pub fn leaning_label(&self) -> Option<&str> {
        match self.leaning? {
            Leaning::Left => Some(&self.left_label),
            Leaning::Right => Some(&self.right_label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasVerdict {
    pub flagged: bool,
    /// Largest imbalance among flagged axes, 0 when nothing is flagged.
    pub score: f64,
    pub axes: Vec<BiasAxisResult>,
    /// One finding per flagged axis.
    pub details: Vec<String>,
    /// Sentences containing the dominant side's terms, in document order.
    pub evidence: Vec<String>,
}

/// Assess `text` for asymmetric framing. Pure; empty text is never flagged.
pub fn detect_bias(text: &str, profile: &BiasProfile) -> BiasVerdict {
    let text_lower = text.to_lowercase();

    let mut axes = Vec::with_capacity(profile.axes.len());
    let mut details = Vec::new();
    let mut dominant_terms: Vec<&str> = Vec::new();

    for axis in &profile.axes {
        let result = assess_axis(&text_lower, axis, profile);
        if let Some(leaning) = result.leaning {
            let side = match leaning {
                Leaning::Left => &axis.left,
                Leaning::Right => &axis.right,
            };
            details.push(side.detail.clone());
            dominant_terms.extend(side.terms.iter().map(String::as_str));
        }
        axes.push(result);
    }

    let flagged = axes.iter().any(|a| a.flagged);
    let score = axes
        .iter()
        .filter(|a| a.flagged)
        .map(|a| a.imbalance)
        .fold(0.0, f64::max);

    let evidence = if dominant_terms.is_empty() {
        Vec::new()
    } else {
        collect_evidence(text, &dominant_terms, profile.max_evidence)
    };

    BiasVerdict {
        flagged,
        score,
        axes,
        details,
        evidence,
    }
}

fn assess_axis(text_lower: &str, axis: &BiasAxisProfile, profile: &BiasProfile) -> BiasAxisResult {
    let left = count_terms(text_lower, &axis.left.terms);
    let right = count_terms(text_lower, &axis.right.terms);
    let (max, min) = (left.max(right), left.min(right));

    let imbalance = if max + min == 0 {
        0.0
    } else {
        (max - min) as f64 / (max + min) as f64
    };

    let dominates = |a: usize, b: usize| {
        a >= profile.min_hits.max(1) && a as f64 > b as f64 * profile.ratio_threshold
    };
    let leaning = if dominates(left, right) {
        Some(Leaning::Left)
    } else if dominates(right, left) {
        Some(Leaning::Right)
    } else {
        None
    };

    BiasAxisResult {
        axis: axis.name.clone(),
        left_label: axis.left.label.clone(),
        right_label: axis.right.label.clone(),
        left_count: left,
        right_count: right,
        imbalance,
        flagged: leaning.is_some(),
        leaning,
    }
}

fn collect_evidence(text: &str, terms: &[&str], max: usize) -> Vec<String> {
    let mut evidence: Vec<String> = Vec::new();
    for sentence in split_sentences(text) {
        if evidence.len() >= max {
            break;
        }
        if contains_any(&sentence.to_lowercase(), terms) {
            let s = normalize_whitespace(sentence);
            if !evidence.contains(&s) {
                evidence.push(s);
            }
        }
    }
    evidence
}
