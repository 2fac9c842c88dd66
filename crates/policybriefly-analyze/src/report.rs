//! Exportable renderings of an [`AnalysisResult`].

use std::fmt::Write;

use chrono::{DateTime, Utc};
use policybriefly_core::Result;

use crate::result::AnalysisResult;
use crate::summary::SummarySource;

/// Export format requested by the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Text => "text/plain; charset=utf-8",
            Self::Json => "application/json",
        }
    }
}

/// `policy_analysis_YYYYMMDD_HHMMSS.<ext>`
pub fn export_filename(format: ExportFormat, at: DateTime<Utc>) -> String {
    format!(
        "policy_analysis_{}.{}",
        at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

pub fn render(result: &AnalysisResult, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Text => Ok(render_text(result)),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(result)?),
    }
}

/// Plain-text report with one section per analysis component.
pub fn render_text(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let doc = &result.document;

    // Writing to a String cannot fail.
    let _ = writeln!(out, "POLICYBRIEFLY ANALYSIS REPORT");
    let _ = writeln!(
        out,
        "Document: {} ({}, {} page(s), {} characters)",
        doc.filename, doc.source_type, doc.pages, doc.characters
    );
    let _ = writeln!(out, "Analyzed: {}", result.analyzed_at.to_rfc3339());

    heading(&mut out, "Executive Summary");
    let _ = writeln!(out, "{}", result.summary.text);
    match &result.summary.source {
        SummarySource::Remote { provider, model } => {
            let _ = writeln!(out, "(Generated by {} model {})", provider, model);
        }
        SummarySource::Fallback => {
            let reason = result
                .summary
                .fallback_reason
                .as_deref()
                .unwrap_or("unspecified");
            let _ = writeln!(out, "(Rule-based summary; remote model unavailable: {})", reason);
        }
    }

    heading(&mut out, "Impact Assessment");
    match &result.impact {
        Some(impact) => {
            for s in &impact.scores {
                let _ = writeln!(out, "{}: {}% ({})", s.dimension.title(), s.score, s.label);
            }
        }
        None => {
            let _ = writeln!(out, "Not requested.");
        }
    }

    heading(&mut out, "Bias Analysis");
    match &result.bias {
        Some(bias) if bias.flagged => {
            let _ = writeln!(out, "Potential bias detected (imbalance {:.2}):", bias.score);
            for detail in &bias.details {
                let _ = writeln!(out, "- {}", detail);
            }
            if !bias.evidence.is_empty() {
                let _ = writeln!(out, "Evidence:");
                for e in &bias.evidence {
                    let _ = writeln!(out, "  > {}", e);
                }
            }
        }
        Some(_) => {
            let _ = writeln!(out, "No significant bias patterns detected.");
        }
        None => {
            let _ = writeln!(out, "Not requested.");
        }
    }

    heading(&mut out, "Important Dates");
    bullet_list(&mut out, &result.key_facts.dates);

    heading(&mut out, "Stakeholders");
    bullet_list(&mut out, &result.key_facts.stakeholders);
    if !result.key_facts.stakeholder_groups.is_empty() {
        let _ = writeln!(
            out,
            "Groups mentioned: {}",
            result.key_facts.stakeholder_groups.join(", ")
        );
    }

    let sections = &result.sections;
    if !sections.is_empty() {
        heading(&mut out, "Key Sections");
        for (label, value) in [
            ("Effective date", &sections.effective_date),
            ("Dates", &sections.dates),
            ("Background", &sections.background),
            ("Economic impact", &sections.economic_impact),
        ] {
            if let Some(v) = value {
                let _ = writeln!(out, "{}: {}", label, v);
            }
        }
    }

    out
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "== {} ==", title);
}

fn bullet_list(out: &mut String, items: &[String]) {
    if items.is_empty() {
        let _ = writeln!(out, "(none found)");
    }
    for item in items {
        let _ = writeln!(out, "- {}", item);
    }
}
