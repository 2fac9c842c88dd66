//! Federal-Register style section extraction (`SUMMARY:`, `III. Economic Impact`, ...).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::facts::extract_dates;
use crate::text::{normalize_whitespace, truncate_chars};

const MAX_SECTION_CHARS: usize = 500;
const EFFECTIVE_DATE_WINDOW: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySections {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub economic_impact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date: Option<String>,
}

impl KeySections {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// "SUMMARY:" / "ECONOMIC IMPACT:" at the start of a line.
static CAPS_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*([A-Z][A-Z ]{2,}?)[ \t]*:").expect("heading pattern compiles"));

// "III. Economic Impact" on a line of its own.
static ROMAN_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*[IVX]{1,5}\.[ \t]+([A-Z][A-Za-z ]{2,60}?)[ \t]*\r?$")
        .expect("roman heading pattern compiles")
});

static EFFECTIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\beffective\b").expect("effective pattern compiles"));

struct Heading {
    key: String,
    start: usize,
    body_start: usize,
}

/// Pull the well-known sections out of a policy document.
pub fn extract_key_sections(text: &str) -> KeySections {
    let mut headings: Vec<Heading> = CAPS_HEADING_RE
        .captures_iter(text)
        .chain(ROMAN_HEADING_RE.captures_iter(text))
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let name = cap.get(1)?;
            Some(Heading {
                key: heading_key(name.as_str()),
                start: whole.start(),
                body_start: whole.end(),
            })
        })
        .collect();
    headings.sort_by_key(|h| h.start);

    let mut sections = KeySections::default();
    for (i, heading) in headings.iter().enumerate() {
        let end = headings
            .get(i + 1)
            .map(|next| next.start)
            .unwrap_or(text.len());
        let body = normalize_whitespace(&text[heading.body_start..end.max(heading.body_start)]);
        if body.is_empty() {
            continue;
        }
        let body = truncate_chars(&body, MAX_SECTION_CHARS);

        let slot = match heading.key.as_str() {
            "summary" => &mut sections.summary,
            "background" => &mut sections.background,
            "date" | "dates" => &mut sections.dates,
            "economic_impact" => &mut sections.economic_impact,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(body);
        }
    }

    sections.effective_date = find_effective_date(text);
    sections
}

fn heading_key(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// First date mentioned shortly after the word "effective".
fn find_effective_date(text: &str) -> Option<String> {
    EFFECTIVE_RE.find_iter(text).find_map(|m| {
        let rest = &text[m.end()..];
        let window_end = rest
            .char_indices()
            .nth(EFFECTIVE_DATE_WINDOW)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        extract_dates(&rest[..window_end], 1).into_iter().next()
    })
}
