//! Resolution-body status parsing.
//!
//! Editors often type the disposition into the resolution text itself:
//! `"ACCEPTED - fix the typo in 6.3"`. A leading status keyword (followed
//! by a non-alphanumeric boundary) derives the status code; the keyword
//! and its trailing punctuation are stripped from the body.

/// Derived status codes.
pub const ACCEPTED: &str = "accepted";
pub const REVISED: &str = "revised";
pub const REJECTED: &str = "rejected";

/// Longest keywords first so `ACCEPTED` never half-matches as `ACCEPT`.
const KEYWORDS: [(&str, &str); 6] = [
    ("ACCEPTED", ACCEPTED),
    ("REVISED", REVISED),
    ("REJECTED", REJECTED),
    ("ACCEPT", ACCEPTED),
    ("REVISE", REVISED),
    ("REJECT", REJECTED),
];

/// Split a leading status keyword off a resolution body.
///
/// Returns the derived status code and the remaining body with the
/// keyword's trailing punctuation and whitespace stripped, or `None`
/// when the body does not start with a recognized keyword.
pub fn split_status_prefix(body: &str) -> Option<(&'static str, String)> {
    let trimmed = body.trim();
    for (keyword, code) in KEYWORDS {
        if trimmed.len() < keyword.len() {
            continue;
        }
        if !trimmed.as_bytes()[..keyword.len()].eq_ignore_ascii_case(keyword.as_bytes()) {
            continue;
        }
        // Keyword bytes are ASCII, so this slice lands on a char boundary
        let rest = &trimmed[keyword.len()..];
        if rest.chars().next().is_some_and(|c| c.is_ascii_alphanumeric()) {
            continue;
        }
        let body = rest
            .trim_start_matches(|c: char| {
                c.is_whitespace() || matches!(c, '-' | ':' | '.' | ',' | ';' | '\u{2013}' | '\u{2014}')
            })
            .to_string();
        return Some((code, body));
    }
    None
}
