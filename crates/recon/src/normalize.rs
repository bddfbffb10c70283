//! Text normalization for corruption-tolerant comparison.
//!
//! The legacy tool round-trips text through Windows-1252, so UTF-8
//! punctuation comes back as mojibake ("don’t" becomes "donâ€™t"), cells
//! pick up a leading quote-escape marker, and unmappable characters are
//! replaced with ASCII stand-ins. Both sides of a comparison are pushed
//! through the same scrub so that equivalent text compares equal.

/// Characters the legacy tool substitutes for punctuation it cannot store.
const SUBSTITUTES: [char; 2] = ['?', '`'];

/// Normalize one side of a text comparison.
pub fn normalize(text: &str) -> String {
    let repaired = repair_mojibake(text);

    // Leading apostrophe is the spreadsheet's text-cell escape marker
    let repaired = repaired.strip_prefix('\'').unwrap_or(&repaired);

    let mut out = String::with_capacity(repaired.len());
    for c in repaired.chars() {
        if SUBSTITUTES.contains(&c) {
            continue;
        }
        // Printable ASCII only; mojibake residue and control chars drop out
        if (' '..='~').contains(&c) {
            out.push(c);
        }
    }
    out.trim().to_string()
}

/// Equality under normalization.
pub fn text_equivalent(canonical: &str, external: &str) -> bool {
    normalize(canonical) == normalize(external)
}

/// Undo a single encoding round trip: UTF-8 bytes that were re-read as
/// Windows-1252. Re-encoding the text as 1252 recovers the original bytes;
/// if those parse as UTF-8 the text was mangled and the decoded form wins.
fn repair_mojibake(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }
    let (bytes, _, had_unmappable) = encoding_rs::WINDOWS_1252.encode(text);
    if had_unmappable {
        return text.to_string();
    }
    match std::str::from_utf8(&bytes) {
        Ok(decoded) if decoded != text => decoded.to_string(),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mojibake_round_trip_repaired() {
        // "don’t" seen through a Windows-1252 window
        assert_eq!(normalize("don\u{e2}\u{20ac}\u{2122}t"), "dont");
        // Repair makes the smart quote non-ASCII again, then scrub drops it
        assert_eq!(normalize("don’t"), "dont");
        assert!(text_equivalent("don’t", "donâ€™t"));
    }

    #[test]
    fn ascii_passes_through() {
        assert_eq!(normalize("plain text, unchanged."), "plain text, unchanged.");
    }

    #[test]
    fn leading_quote_marker_dropped() {
        assert!(text_equivalent("=SUM reference", "'=SUM reference"));
    }

    #[test]
    fn substitutes_and_controls_dropped() {
        assert!(text_equivalent("it\u{2019}s fine", "it?s fine"));
        assert_eq!(normalize("tab\there"), "tabhere");
    }

    #[test]
    fn genuinely_different_text_stays_different() {
        assert!(!text_equivalent("change the PHY clause", "change the MAC clause"));
    }

    #[test]
    fn valid_non_ascii_without_mangling_is_scrubbed_not_corrupted() {
        // "naïve" encodes cleanly to 1252 but its bytes are not valid UTF-8,
        // so repair leaves it alone and the scrub drops the accent
        assert_eq!(normalize("na\u{ef}ve"), "nave");
        assert!(text_equivalent("na\u{ef}ve", "nave"));
    }
}
