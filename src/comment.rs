//! Translator comment association.
//!
//! A comment on the same line as the call (after a `//` marker) wins; when
//! there is none, a comment occupying the whole line directly above the call
//! is used instead. An `i18n:` tag after the marker is conventional and is
//! stripped before the text reaches translators.

/// Finds the translator comment for a call matched at `[start, end)`.
/// Returns `None` rather than an empty comment when there is nothing usable.
pub fn associate(text: &str, start: usize, end: usize) -> Option<String> {
    same_line(text, end).or_else(|| preceding_line(text, start))
}

/// A `//` comment between the end of the call and the end of its line.
fn same_line(text: &str, end: usize) -> Option<String> {
    let rest = &text[end..];
    let line = rest.split('\n').next().unwrap_or(rest);
    let marker = line.find("//")?;
    comment_text(&line[marker + 2..])
}

/// A comment filling the line directly above the call: either a `//` line
/// comment or a one-line `/* ... */` block.
fn preceding_line(text: &str, start: usize) -> Option<String> {
    let line_start = match text[..start].rfind('\n') {
        Some(newline) => newline + 1,
        None => return None, // call is on the first line
    };
    let prev_start = text[..line_start - 1]
        .rfind('\n')
        .map(|newline| newline + 1)
        .unwrap_or(0);
    let prev = text[prev_start..line_start - 1].trim();

    if let Some(after) = prev.strip_prefix("//") {
        comment_text(after)
    } else if prev.starts_with("/*") && prev.ends_with("*/") && prev.len() >= 4 {
        comment_text(&prev[2..prev.len() - 2])
    } else {
        None
    }
}

fn comment_text(after_marker: &str) -> Option<String> {
    let trimmed = after_marker.trim();
    let trimmed = trimmed
        .strip_prefix("i18n:")
        .map(str::trim_start)
        .unwrap_or(trimmed);
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
