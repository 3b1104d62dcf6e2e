use super::engine::Detector;
use crate::types::*;

pub const NBSP: char = '\u{a0}';

pub const COLON_NOTE: &str = "Missing NBSP before colon";

/// Flags every colon that is not immediately preceded by a non-breaking space.
///
/// Equivalent to the lookbehind pattern `(?<!\u00A0):`, which the regex crate
/// cannot express, so the preceding character is inspected directly.
pub struct ColonSpacingDetector;

impl ColonSpacingDetector {
    pub const NAME: &'static str = "NonBreakingSpace";

    pub fn new() -> Self {
        Self
    }
}

impl Default for ColonSpacingDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ColonSpacingDetector {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn category(&self) -> IssueCategory {
        IssueCategory::NonBreakingSpace
    }

    fn detect(&self, text: &str) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut previous: Option<char> = None;

        for (idx, ch) in text.char_indices() {
            if ch == ':' && previous != Some(NBSP) {
                findings.push(Finding::new(
                    self.category(),
                    Span::new(idx, idx + ch.len_utf8()),
                    COLON_NOTE,
                ));
            }
            previous = Some(ch);
        }

        findings
    }
}
