//! Small text utilities shared by the analyzers.

/// Split text into sentences without lookbehind.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace, or at a blank
/// line. Returned slices are trimmed and never empty.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let boundary = if (b == b'.' || b == b'!' || b == b'?')
            && i + 1 < bytes.len()
            && bytes[i + 1].is_ascii_whitespace()
        {
            Some(i + 1)
        } else if b == b'\n' && is_blank_line_after(bytes, i) {
            Some(i)
        } else {
            None
        };

        if let Some(end) = boundary {
            let s = text[start..end].trim();
            if !s.is_empty() {
                sentences.push(s);
            }
            start = end;
        }
        i += 1;
    }
    let s = text[start..].trim();
    if !s.is_empty() {
        sentences.push(s);
    }
    sentences
}

/// True when the newline at `i` is followed by a whitespace-only line.
fn is_blank_line_after(bytes: &[u8], i: usize) -> bool {
    for &b in &bytes[i + 1..] {
        match b {
            b'\n' => return true,
            b' ' | b'\t' | b'\r' => continue,
            _ => return false,
        }
    }
    false
}

/// Collapse runs of whitespace (including newlines) into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `s` to at most `max_chars` characters, appending `...` when cut.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", s[..idx].trim_end()),
        None => s.to_string(),
    }
}

/// Count occurrences of `term` in `text_lower` that start at a word boundary.
///
/// Both arguments must already be lower-cased. A match may continue into a
/// longer word, so `"requirement"` also counts `"requirements"`.
pub fn count_term(text_lower: &str, term: &str) -> usize {
    if term.is_empty() {
        return 0;
    }
    text_lower
        .match_indices(term)
        .filter(|(idx, _)| {
            text_lower[..*idx]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric())
        })
        .count()
}

/// Sum of [`count_term`] over a list of terms.
pub fn count_terms<S: AsRef<str>>(text_lower: &str, terms: &[S]) -> usize {
    terms
        .iter()
        .map(|t| count_term(text_lower, &t.as_ref().to_lowercase()))
        .sum()
}

/// True when `sentence_lower` contains any of `terms` at a word start.
pub fn contains_any<S: AsRef<str>>(sentence_lower: &str, terms: &[S]) -> bool {
    terms
        .iter()
        .any(|t| count_term(sentence_lower, &t.as_ref().to_lowercase()) > 0)
}
