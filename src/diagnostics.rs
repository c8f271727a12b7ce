//! Misuse detection for the resource-bundle call family.
//!
//! Runs independently of extraction and never alters its results: a call
//! flagged here has already produced no resource. Detection is pattern-based
//! and deliberately narrow; it exists to tell developers why a string they
//! wrote did not get extracted.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::{Diagnostic, DiagnosticKind};

lazy_static! {
    // A literal first argument followed by `+`.
    static ref CONCAT_AFTER_LITERAL: Regex =
        Regex::new(r#"(?:^|\W)RB\.getString\s*\(\s*"(?:\\"|[^"])*"\s*\+"#).unwrap();
    // Something else concatenated with a trailing literal.
    static ref CONCAT_BEFORE_LITERAL: Regex =
        Regex::new(r#"(?:^|\W)RB\.getString\s*\([^)]*\+\s*"(?:\\"|[^"])*"\s*\)"#).unwrap();
    // No string literal anywhere in the argument list.
    static ref NON_STRING_ARGUMENT: Regex =
        Regex::new(r#"(?:^|\W)RB\.getString\s*\([^")]*\)"#).unwrap();
}

/// Scans one buffer for bundle-call misuse. At most one diagnostic is
/// reported per call site; when several patterns hit the same site, the
/// first kind in declaration order wins.
pub fn scan(text: &str, path: &str) -> Vec<Diagnostic> {
    let patterns: [(&Regex, DiagnosticKind); 3] = [
        (&*CONCAT_AFTER_LITERAL, DiagnosticKind::ConcatAfterLiteral),
        (&*CONCAT_BEFORE_LITERAL, DiagnosticKind::ConcatBeforeLiteral),
        (&*NON_STRING_ARGUMENT, DiagnosticKind::NonStringArgument),
    ];

    let mut seen_sites = Vec::new();
    let mut diagnostics = Vec::new();

    for (pattern, kind) in patterns {
        for found in pattern.find_iter(text) {
            // The alternation may have consumed one boundary character;
            // site identity is the offset of the call itself.
            let matched = found.as_str();
            let call_offset = matched.find("RB.getString").unwrap_or(0);
            let site = found.start() + call_offset;
            if seen_sites.contains(&site) {
                continue;
            }
            seen_sites.push(site);

            let snippet = matched[call_offset..].to_string();
            tracing::warn!("{}: {}: ... {} ...", path, kind.message(), snippet);
            diagnostics.push(Diagnostic {
                kind,
                path: path.to_string(),
                snippet,
            });
        }
    }

    diagnostics
}
