//! Key-fact extraction: dates, named stakeholders, and stakeholder groups.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::profile::FactsProfile;
use crate::text::normalize_whitespace;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFacts {
    /// Date strings in order of first appearance.
    pub dates: Vec<String>,
    /// Capitalized multi-word names in order of first appearance.
    pub stakeholders: Vec<String>,
    /// Generic stakeholder nouns ("businesses", "public", ...), lower-cased.
    pub stakeholder_groups: Vec<String>,
}

const MONTHS: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";

static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        format!(r"\b(?:{MONTHS})\s+\d{{1,2}}(?:st|nd|rd|th)?,?\s+\d{{4}}\b"),
        r"\b(?:Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sept|Sep|Oct|Nov|Dec)\.?\s+\d{1,2}(?:st|nd|rd|th)?,?\s+\d{4}\b"
            .to_string(),
        format!(r"\b\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{MONTHS}),?\s+\d{{4}}\b"),
        r"\b\d{1,2}[/-]\d{1,2}[/-]\d{4}\b".to_string(),
        r"\b\d{4}-\d{2}-\d{2}\b".to_string(),
    ]
    .iter()
    .map(|p| Regex::new(p).expect("date pattern compiles"))
    .collect()
});

// Runs of capitalized words on one line, optionally joined by function words
// ("Resource Conservation and Recovery Act").
static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][A-Za-z]*(?:[ \t]+(?:(?:of|and|for|on|the)[ \t]+)?[A-Z][A-Za-z]*)+\b")
        .expect("name pattern compiles")
});

static GROUP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:businesses|business|companies|company|corporations|corporation|firms|firm|citizens|citizen|public|communities|community|consumers|consumer|government|agencies|agency|departments|department|environmental groups|environmental group|advocacy|organizations|organization)\b",
    )
    .expect("group pattern compiles")
});

const LEADING_STOPWORDS: &[&str] = &[
    "The", "A", "An", "This", "That", "These", "Those", "Under", "In", "On", "For", "Any",
    "Each", "All", "Our", "Its", "If", "When", "Where", "Whether",
];

const CALENDAR_WORDS: &[&str] = &[
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday",
    "Saturday", "Sunday",
];

/// Extract dates and stakeholders. Deterministic and order-stable.
pub fn extract_key_facts(text: &str, profile: &FactsProfile) -> KeyFacts {
    KeyFacts {
        dates: extract_dates(text, profile.max_dates),
        stakeholders: extract_stakeholders(
            text,
            profile.max_stakeholders,
            profile.min_stakeholder_chars,
        ),
        stakeholder_groups: extract_stakeholder_groups(text, profile.max_stakeholder_groups),
    }
}

/// Date strings across all supported formats, ordered by position.
pub fn extract_dates(text: &str, max: usize) -> Vec<String> {
    let mut spans: Vec<(usize, usize)> = DATE_PATTERNS
        .iter()
        .flat_map(|re| re.find_iter(text).map(|m| (m.start(), m.end())))
        .collect();
    spans.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let mut dates: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut covered_until = 0;
    for (start, end) in spans {
        if dates.len() >= max {
            break;
        }
        if start < covered_until {
            continue;
        }
        covered_until = end;
        let date = normalize_whitespace(&text[start..end]);
        if seen.insert(date.clone()) {
            dates.push(date);
        }
    }
    dates
}

/// Named stakeholders: capitalized multi-word phrases.
pub fn extract_stakeholders(text: &str, max: usize, min_chars: usize) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for m in NAME_RE.find_iter(text) {
        if names.len() >= max {
            break;
        }
        // ALL-CAPS phrases right before a colon are section headings.
        let is_heading = text[m.end()..].starts_with(':')
            && !m.as_str().chars().any(|c| c.is_lowercase());
        if is_heading {
            continue;
        }

        let mut words: Vec<&str> = m.as_str().split_whitespace().collect();
        while words.first().is_some_and(|w| LEADING_STOPWORDS.contains(w)) {
            words.remove(0);
        }
        let capitalized = words
            .iter()
            .filter(|w| w.chars().next().is_some_and(char::is_uppercase))
            .count();
        if capitalized < 2 {
            continue;
        }
        if words.iter().all(|w| CALENDAR_WORDS.contains(w)) {
            continue;
        }

        let name = words.join(" ");
        if name.chars().count() < min_chars {
            continue;
        }
        if seen.insert(name.to_lowercase()) {
            names.push(name);
        }
    }
    names
}

/// Generic stakeholder groups, lower-cased, ordered by first appearance.
pub fn extract_stakeholder_groups(text: &str, max: usize) -> Vec<String> {
    let text_lower = text.to_lowercase();
    let mut groups: Vec<String> = Vec::new();
    for m in GROUP_RE.find_iter(&text_lower) {
        if groups.len() >= max {
            break;
        }
        let g = m.as_str().to_string();
        if !groups.contains(&g) {
            groups.push(g);
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = "The deadline is January 15, 2025. ACME Corporation must comply.";

    #[test]
    fn test_scenario() {
        let facts = extract_key_facts(SCENARIO, &FactsProfile::default());
        assert!(facts.dates.contains(&"January 15, 2025".to_string()));
        assert!(facts.stakeholders.contains(&"ACME Corporation".to_string()));
    }

    #[test]
    fn test_idempotent() {
        let profile = FactsProfile::default();
        let a = extract_key_facts(SCENARIO, &profile);
        let b = extract_key_facts(SCENARIO, &profile);
        assert_eq!(a, b);
    }

    #[test]
    fn test_date_formats_in_document_order() {
        let text = "Comments due 2025-03-01. Effective 12/31/2024, revised Sept. 3rd, 2025 \
                    and again on 4 July 2026. Published March 2, 2024.";
        let dates = extract_dates(text, 10);
        assert_eq!(
            dates,
            vec!["2025-03-01", "12/31/2024", "Sept. 3rd, 2025", "4 July 2026", "March 2, 2024"]
        );
    }

    #[test]
    fn test_dates_deduplicated_and_capped() {
        let text = "On 1/2/2024 and 1/2/2024 again, then 2/2/2024, 3/2/2024, 4/2/2024.";
        assert_eq!(extract_dates(text, 10), vec!["1/2/2024", "2/2/2024", "3/2/2024", "4/2/2024"]);
        assert_eq!(extract_dates(text, 2).len(), 2);
    }

    #[test]
    fn test_zero_caps_return_nothing() {
        assert!(extract_dates("On 1/2/2024 and 3/4/2025.", 0).is_empty());
        assert!(extract_stakeholders("ACME Corporation must comply.", 0, 5).is_empty());
        let profile = FactsProfile {
            max_dates: 0,
            ..FactsProfile::default()
        };
        assert!(extract_key_facts(SCENARIO, &profile).dates.is_empty());
    }

    #[test]
    fn test_stakeholders_strip_leading_articles_and_join_connectors() {
        let text = "SUMMARY: The Environmental Protection Agency amends rules under the \
                    Resource Conservation and Recovery Act.";
        let names = extract_stakeholders(text, 8, 5);
        assert_eq!(
            names,
            vec!["Environmental Protection Agency", "Resource Conservation and Recovery Act"]
        );
    }

    #[test]
    fn test_stakeholders_skip_headings_and_dates() {
        let text = "SUPPLEMENTARY INFORMATION:\nOn Monday January 5 we met.";
        assert!(extract_stakeholders(text, 8, 5).is_empty());
    }

    #[test]
    fn test_stakeholders_case_insensitive_dedup() {
        let text = "ENVIRONMENTAL PROTECTION AGENCY\nThe Environmental Protection Agency said so.";
        assert_eq!(
            extract_stakeholders(text, 8, 5),
            vec!["ENVIRONMENTAL PROTECTION AGENCY"]
        );
    }

    #[test]
    fn test_stakeholder_groups() {
        let text = "Small businesses and the public, plus government agencies and Businesses.";
        assert_eq!(
            extract_stakeholder_groups(text, 8),
            vec!["businesses", "public", "government", "agencies"]
        );
    }

    #[test]
    fn test_empty_text() {
        let facts = extract_key_facts("", &FactsProfile::default());
        assert_eq!(facts, KeyFacts::default());
    }
}
