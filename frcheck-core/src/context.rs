//! Context snippets for report rows.
//!
//! The window is counted in characters, not bytes, so accented text gets the
//! same amount of context as ASCII. Offsets past the end of the text or inside
//! a multi-byte character are clipped instead of panicking.

use crate::types::Span;

/// Characters of context kept on each side of a match.
pub const DEFAULT_CONTEXT_RADIUS: usize = 30;

/// `"..." + trim(text[start - radius .. end + radius]) + "..."`
pub fn extract_context(text: &str, span: Span, radius: usize) -> String {
    let start = floor_char_boundary(text, span.start);
    let end = ceil_char_boundary(text, span.end.max(start));

    let from = text[..start]
        .char_indices()
        .rev()
        .take(radius)
        .last()
        .map(|(i, _)| i)
        .unwrap_or(start);

    let to = text[end..]
        .char_indices()
        .nth(radius)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());

    format!("...{}...", text[from..to].trim())
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index += 1;
    }
    index
}
