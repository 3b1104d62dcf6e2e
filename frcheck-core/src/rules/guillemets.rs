use super::engine::Detector;
use crate::types::*;

pub const OPENING_NOTE: &str = "Missing regular space after «";
pub const CLOSING_NOTE: &str = "Missing regular space before »";

/// Flags « directly followed by a letter and » directly preceded by a letter.
///
/// Only letters count: the « in «3 pommes» and both markers in «(voir).» are
/// left alone.
pub struct GuillemetSpacingDetector;

impl GuillemetSpacingDetector {
    pub const NAME: &'static str = "GuillemetSpacing";

    pub fn new() -> Self {
        Self
    }
}

impl Default for GuillemetSpacingDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn is_glued_letter(neighbour: Option<char>) -> bool {
    matches!(neighbour, Some(c) if c != ' ' && c.is_alphabetic())
}

impl Detector for GuillemetSpacingDetector {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn category(&self) -> IssueCategory {
        IssueCategory::GuillemetSpacing
    }

    fn detect(&self, text: &str) -> Vec<Finding> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut findings = Vec::new();

        for (i, &(idx, ch)) in chars.iter().enumerate() {
            let span = Span::new(idx, idx + ch.len_utf8());
            match ch {
                '«' => {
                    let after = chars.get(i + 1).map(|&(_, c)| c);
                    if is_glued_letter(after) {
                        findings.push(Finding::new(self.category(), span, OPENING_NOTE));
                    }
                }
                '»' => {
                    let before = i.checked_sub(1).map(|j| chars[j].1);
                    if is_glued_letter(before) {
                        findings.push(Finding::new(self.category(), span, CLOSING_NOTE));
                    }
                }
                _ => {}
            }
        }

        findings
    }
}
