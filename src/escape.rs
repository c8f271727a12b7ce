//! String-literal decoding and cleaning.
//!
//! [`unescape`] turns a raw quoted token into the string the host language
//! would hold in memory. [`clean`] additionally normalizes whitespace and is
//! used only for key derivation, never for the stored source text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // The two-character escapes that count as whitespace when cleaning.
    static ref TWO_CHAR_ESCAPE: Regex = Regex::new(r"\\[btnfr]").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"[ \n\t\r\f]+").unwrap();
}

/// Prefix modifiers written immediately before the opening quote of a string
/// literal (`r`, `rf`, `f`, `u`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Raw literal: escape sequences stay literal text.
    pub raw: bool,
    /// Formatted literal. Interpolation fields are left as-is.
    pub formatted: bool,
    /// Explicit unicode literal marker.
    pub unicode: bool,
}

impl Modifiers {
    pub fn from_prefix(prefix: &str) -> Self {
        Modifiers {
            raw: prefix.contains('r'),
            formatted: prefix.contains('f'),
            unicode: prefix.contains('u'),
        }
    }
}

/// Decodes a raw literal into the string the host language would hold in
/// memory: `\uXXXX` (1-4 hex digits) and `\NNN` (1-3 octal digits) become
/// code points, doubled backslashes collapse to one, `\'` and `\"` are
/// unescaped. Never fails; anything unrecognized passes through unchanged.
///
/// Raw literals come back verbatim.
pub fn unescape(raw: &str, modifiers: Modifiers) -> String {
    if modifiers.raw {
        return raw.to_string();
    }
    let decoded = decode_unicode_escapes(raw);
    let decoded = decode_octal_escapes(&decoded);
    unescape_quotes(&collapse_double_backslashes(&decoded))
}

/// Cleans a raw literal for key derivation: unescape, then map the
/// two-character escapes `\b \t \n \f \r` to a space, collapse whitespace
/// runs to one space, and trim both ends.
pub fn clean(raw: &str, modifiers: Modifiers) -> String {
    let unescaped = unescape(raw, modifiers);
    let spaced = TWO_CHAR_ESCAPE.replace_all(&unescaped, " ");
    let collapsed = WHITESPACE_RUN.replace_all(&spaced, " ");
    collapsed.trim().to_string()
}

/// Trims whitespace and the two-character escapes `\t \n \f \r` from both
/// ends of an already-decoded literal. Interior escapes are kept.
pub fn trim_escaped(text: &str) -> &str {
    const LEADING: [&str; 4] = ["\\t", "\\n", "\\f", "\\r"];

    let mut s = text;
    loop {
        let trimmed = s.trim_start();
        let trimmed = LEADING
            .iter()
            .find_map(|esc| trimmed.strip_prefix(esc))
            .unwrap_or(trimmed);
        if trimmed.len() == s.len() {
            break;
        }
        s = trimmed;
    }
    loop {
        let trimmed = s.trim_end();
        let trimmed = LEADING
            .iter()
            .find_map(|esc| trimmed.strip_suffix(esc))
            .unwrap_or(trimmed);
        if trimmed.len() == s.len() {
            break;
        }
        s = trimmed;
    }
    s
}

fn decode_unicode_escapes(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 1 < bytes.len() && bytes[i + 1] == b'u' {
            let mut j = i + 2;
            while j < bytes.len() && j < i + 6 && bytes[j].is_ascii_hexdigit() {
                j += 1;
            }
            if j > i + 2 {
                // Surrogate values cannot be represented; left verbatim.
                if let Some(ch) = u32::from_str_radix(&input[i + 2..j], 16)
                    .ok()
                    .and_then(char::from_u32)
                {
                    out.push_str(&input[copied..i]);
                    out.push(ch);
                    copied = j;
                }
                i = j;
                continue;
            }
        }
        i += 1;
    }

    out.push_str(&input[copied..]);
    out
}

fn decode_octal_escapes(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 1 < bytes.len() && (b'0'..=b'7').contains(&bytes[i + 1]) {
            let mut j = i + 1;
            while j < bytes.len() && j < i + 4 && (b'0'..=b'7').contains(&bytes[j]) {
                j += 1;
            }
            if let Some(ch) = u32::from_str_radix(&input[i + 1..j], 8)
                .ok()
                .and_then(char::from_u32)
            {
                out.push_str(&input[copied..i]);
                out.push(ch);
                copied = j;
            }
            i = j;
            continue;
        }
        i += 1;
    }

    out.push_str(&input[copied..]);
    out
}

// Pairs collapse left to right, non-overlapping.
fn collapse_double_backslashes(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut copied = 0;
    let mut i = 0;

    while i + 1 < bytes.len() {
        if bytes[i] == b'\\' && bytes[i + 1] == b'\\' {
            out.push_str(&input[copied..i]);
            out.push('\\');
            copied = i + 2;
            i += 2;
        } else {
            i += 1;
        }
    }

    out.push_str(&input[copied..]);
    out
}

fn unescape_quotes(input: &str) -> String {
    input.replace("\\'", "'").replace("\\\"", "\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_plain_text_is_unchanged() {
        assert_eq!(unescape("This is a test", Modifiers::default()), "This is a test");
    }

    #[test]
    fn test_unescape_quotes() {
        assert_eq!(
            unescape(r#"This is a \"test\"."#, Modifiers::default()),
            "This is a \"test\"."
        );
        assert_eq!(
            unescape(r"This is a \'test\'.", Modifiers::default()),
            "This is a 'test'."
        );
    }

    #[test]
    fn test_unescape_unicode_escapes() {
        assert_eq!(unescape(r"\u00A0 \u0023", Modifiers::default()), "\u{A0} #");
        // Greedy up to four hex digits, shorter sequences still decode.
        assert_eq!(unescape(r"\u41g", Modifiers::default()), "Ag");
    }

    #[test]
    fn test_unescape_octal_escapes() {
        assert_eq!(unescape(r"A \40 \011 B", Modifiers::default()), "A   \t B");
    }

    #[test]
    fn test_unescape_collapses_doubled_backslashes() {
        assert_eq!(
            unescape(r"\\nTry a Virtual Consult", Modifiers::default()),
            r"\nTry a Virtual Consult"
        );
    }

    #[test]
    fn test_unescape_leaves_unknown_escapes() {
        assert_eq!(unescape(r"a\qb \n", Modifiers::default()), r"a\qb \n");
        // Lone surrogate values cannot become chars; the escape survives.
        assert_eq!(unescape(r"\uD800", Modifiers::default()), r"\uD800");
    }

    #[test]
    fn test_unescape_raw_literal_is_verbatim() {
        let raw = Modifiers::from_prefix("r");
        assert_eq!(unescape(r#"A \' \\ \n"#, raw), r#"A \' \\ \n"#);
    }

    #[test]
    fn test_modifiers_from_prefix() {
        assert_eq!(
            Modifiers::from_prefix("rf"),
            Modifiers {
                raw: true,
                formatted: true,
                unicode: false
            }
        );
        assert!(Modifiers::from_prefix("u").unicode);
        assert_eq!(Modifiers::from_prefix(""), Modifiers::default());
    }

    #[test]
    fn test_clean_collapses_escaped_whitespace() {
        assert_eq!(clean(r"A \b\t\n\f\r B", Modifiers::default()), "A B");
        assert_eq!(clean(r"foo \n \t bar", Modifiers::default()), "foo bar");
    }

    #[test]
    fn test_clean_collapses_real_whitespace() {
        assert_eq!(
            clean("Can't   \t\n \t   find an    \t \n \r   application for SMS", Modifiers::default()),
            "Can't find an application for SMS"
        );
    }

    #[test]
    fn test_clean_trims_ends() {
        assert_eq!(clean("  \t \n  This is a test\n\n\t   ", Modifiers::default()), "This is a test");
        // Unicode whitespace at the ends goes too; interior stays.
        assert_eq!(clean(r"\u00A0 \u0023", Modifiers::default()), "#");
    }

    #[test]
    fn test_trim_escaped() {
        assert_eq!(trim_escaped(r"  \t \n  This is a test\n\n\t   "), "This is a test");
        assert_eq!(trim_escaped(r"\nTry a Virtual Consult"), "Try a Virtual Consult");
        assert_eq!(trim_escaped(r"interior \n stays"), r"interior \n stays");
        assert_eq!(trim_escaped(""), "");
    }
}
