use regex::Regex;
use std::sync::LazyLock;

use super::engine::Detector;
use crate::types::*;

// (613) 555-1234, (613)-555 1234, (613)555-1234
static PARENTHESIZED_PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d{3}\)[\s-]?\d{3}[- ]\d{4}").unwrap());

// 613-555-1234, 613 555 1234
static PLAIN_PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{3}[- ]\d{3}[- ]\d{4}\b").unwrap());

pub const PHONE_NOTE: &str = "Missing non-breaking hyphen in phone number";

/// Flags phone numbers separated with plain hyphens or spaces.
///
/// Both patterns are evaluated independently: all matches of the
/// parenthesized form come first, then all matches of the plain form, and a
/// number matched by both is reported twice.
pub struct PhoneFormatDetector {
    patterns: Vec<&'static Regex>,
}

impl PhoneFormatDetector {
    pub const NAME: &'static str = "PhoneFormat";

    pub fn new() -> Self {
        Self {
            patterns: vec![&*PARENTHESIZED_PHONE_REGEX, &*PLAIN_PHONE_REGEX],
        }
    }
}

impl Default for PhoneFormatDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for PhoneFormatDetector {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn category(&self) -> IssueCategory {
        IssueCategory::PhoneFormat
    }

    fn detect(&self, text: &str) -> Vec<Finding> {
        self.patterns
            .iter()
            .flat_map(|pattern| pattern.find_iter(text))
            .map(|m| Finding::new(self.category(), m.into(), PHONE_NOTE))
            .collect()
    }
}
