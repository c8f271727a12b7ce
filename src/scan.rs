//! Call-shape matchers.
//!
//! Matching is pattern-based over raw text, not an AST: each shape scans for
//! a whole-word marker followed by a parenthesized list of quoted string
//! arguments. A marker appearing inside an unrelated string literal can
//! therefore produce a spurious match; that is an accepted limitation.
//!
//! The scan step is pure: callers thread an explicit byte position through
//! [`next_match`] and continue from the end of each returned match, so there
//! is no hidden cursor state and every pass over the same text is
//! deterministic.

use crate::escape::Modifiers;
use crate::key::KeyScheme;

/// The closed set of recognized call shapes, in extraction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallShape {
    /// `_("...")`, `gettext("...")`, `gettext_lazy("...")`
    Simple,
    /// `gettext_noop("...")`: inventoried but never translated.
    NoOp,
    /// `RB.getString("...")`: hashed resource-bundle key.
    Bundle,
    /// `RB.getString("...", "id")`: explicit resource-bundle key.
    BundleKeyed,
    /// `pgettext("source", "context")`
    Context,
    /// `ngettext("one", "other", n)`
    Plural,
    /// `npgettext("context", "one", "other", n)`
    ContextPlural,
}

impl CallShape {
    /// Fixed extraction order. Orchestration runs shapes in this order, so
    /// discovery indexes are reproducible across runs.
    pub const ALL: [CallShape; 7] = [
        CallShape::Simple,
        CallShape::NoOp,
        CallShape::Bundle,
        CallShape::BundleKeyed,
        CallShape::Context,
        CallShape::Plural,
        CallShape::ContextPlural,
    ];

    /// The marker names this shape scans for.
    pub fn markers(self) -> &'static [&'static str] {
        match self {
            CallShape::Simple => &["_", "gettext", "gettext_lazy"],
            CallShape::NoOp => &["gettext_noop"],
            CallShape::Bundle | CallShape::BundleKeyed => &["RB.getString"],
            CallShape::Context => &["pgettext", "pgettext_lazy"],
            CallShape::Plural => &["ngettext", "ngettext_lazy"],
            CallShape::ContextPlural => &["npgettext", "npgettext_lazy"],
        }
    }

    /// How many quoted string arguments the shape requires.
    fn string_args(self) -> usize {
        match self {
            CallShape::Simple | CallShape::NoOp | CallShape::Bundle => 1,
            CallShape::BundleKeyed | CallShape::Context | CallShape::Plural => 2,
            CallShape::ContextPlural => 3,
        }
    }

    /// Plural shapes end at the comma before the (unparsed) count
    /// expression; the others end at the closing parenthesis.
    fn ends_at_comma(self) -> bool {
        matches!(self, CallShape::Plural | CallShape::ContextPlural)
    }

    /// The key derivation strategy for this shape.
    pub fn key_scheme(self) -> KeyScheme {
        match self {
            CallShape::Bundle | CallShape::BundleKeyed => KeyScheme::Hashed,
            _ => KeyScheme::Text,
        }
    }
}

/// A quoted token as written in source, escapes intact, plus its prefix
/// modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLiteral<'a> {
    pub text: &'a str,
    pub modifiers: Modifiers,
}

/// One recognized call. Ephemeral: spans index into the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallMatch<'a> {
    pub shape: CallShape,
    /// Raw string arguments in call order.
    pub literals: Vec<RawLiteral<'a>>,
    /// Byte offset of the marker.
    pub start: usize,
    /// Byte offset just past the call (or past the comma before the count
    /// expression, for plural shapes).
    pub end: usize,
}

/// Finds the next occurrence of `shape` at or after byte position `from`.
///
/// A candidate marker is rejected when it is immediately preceded by an
/// identifier character, or when the argument list does not parse; scanning
/// then resumes past the candidate. Returns `None` when no match remains.
pub fn next_match(text: &str, from: usize, shape: CallShape) -> Option<CallMatch<'_>> {
    let bytes = text.as_bytes();
    let mut pos = from;

    while pos < bytes.len() {
        let (start, marker) = find_marker(text, pos, shape.markers())?;
        if start > 0 && is_word_byte(bytes[start - 1]) {
            pos = start + 1;
            continue;
        }
        if let Some((literals, end)) = parse_call(text, start + marker.len(), shape) {
            return Some(CallMatch {
                shape,
                literals,
                start,
                end,
            });
        }
        pos = start + 1;
    }

    None
}

/// Earliest occurrence of any marker at or after `from`; ties at the same
/// offset go to the longest marker so `gettext_lazy` is not seen as
/// `gettext`.
fn find_marker<'m>(text: &str, from: usize, markers: &'m [&'m str]) -> Option<(usize, &'m str)> {
    let mut best: Option<(usize, &str)> = None;
    for &marker in markers {
        if let Some(offset) = text.get(from..).and_then(|rest| rest.find(marker)) {
            let at = from + offset;
            best = match best {
                Some((b, m)) if b < at || (b == at && m.len() >= marker.len()) => Some((b, m)),
                _ => Some((at, marker)),
            };
        }
    }
    best
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Parses `( lit , lit , ... )` after a marker. Returns the literals and the
/// byte offset just past the call terminator, or `None` when the text at
/// this site is not a well-formed call of the given shape.
fn parse_call(text: &str, after_marker: usize, shape: CallShape) -> Option<(Vec<RawLiteral<'_>>, usize)> {
    let bytes = text.as_bytes();
    let mut i = skip_whitespace(bytes, after_marker);

    if bytes.get(i) != Some(&b'(') {
        return None;
    }
    i += 1;

    let mut literals = Vec::with_capacity(shape.string_args());
    for argno in 0..shape.string_args() {
        if argno > 0 {
            i = skip_whitespace(bytes, i);
            if bytes.get(i) != Some(&b',') {
                return None;
            }
            i += 1;
        }
        i = skip_whitespace(bytes, i);
        let (literal, next) = parse_string_literal(text, i)?;
        literals.push(literal);
        i = next;
    }

    i = skip_whitespace(bytes, i);
    let terminator = if shape.ends_at_comma() { b',' } else { b')' };
    if bytes.get(i) != Some(&terminator) {
        return None;
    }

    Some((literals, i + 1))
}

/// Parses one quoted token with an optional `r`/`rf`/`f`/`u` prefix.
/// Backslash escapes never terminate the literal; the raw text between the
/// quotes is returned with escapes intact.
fn parse_string_literal(text: &str, at: usize) -> Option<(RawLiteral<'_>, usize)> {
    let bytes = text.as_bytes();

    let mut i = at;
    let mut prefix = "";
    for candidate in ["rf", "r", "f", "u"] {
        let end = at + candidate.len();
        if text.get(at..end) == Some(candidate)
            && matches!(bytes.get(end), Some(&b'\'') | Some(&b'"'))
        {
            prefix = candidate;
            i = end;
            break;
        }
    }

    let quote = match bytes.get(i).copied() {
        Some(q @ (b'\'' | b'"')) => q,
        _ => return None,
    };
    i += 1;
    let content_start = i;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => {
                let literal = RawLiteral {
                    text: &text[content_start..i],
                    modifiers: Modifiers::from_prefix(prefix),
                };
                return Some((literal, i + 1));
            }
            _ => i += 1,
        }
    }

    None // unterminated literal
}
