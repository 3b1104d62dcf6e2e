use regex::Regex;
use std::sync::LazyLock;

use super::engine::Detector;
use crate::types::*;

// A word-bounded token containing a straight apostrophe: l'école, aujourd'hui, qu'il
static STRAIGHT_APOSTROPHE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w*'\w*\b").unwrap());

pub const APOSTROPHE_NOTE: &str = "Straight apostrophe used instead of curved (’)";

/// Flags every token written with a typewriter apostrophe instead of ’.
pub struct ApostropheDetector;

impl ApostropheDetector {
    pub const NAME: &'static str = "Apostrophe";

    pub fn new() -> Self {
        Self
    }
}

impl Default for ApostropheDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ApostropheDetector {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn category(&self) -> IssueCategory {
        IssueCategory::Apostrophe
    }

    fn detect(&self, text: &str) -> Vec<Finding> {
        STRAIGHT_APOSTROPHE_REGEX
            .find_iter(text)
            .map(|m| Finding::new(self.category(), m.into(), APOSTROPHE_NOTE))
            .collect()
    }
}
