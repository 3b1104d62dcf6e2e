use super::engine::Detector;
use crate::config::AgreementRuleConfig;
use crate::types::*;

/// A hand-authored agreement fix: exact text and the correction to suggest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgreementRule {
    pub pattern: String,
    pub suggestion: String,
}

impl AgreementRule {
    pub fn new(pattern: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            suggestion: suggestion.into(),
        }
    }
}

impl From<&AgreementRuleConfig> for AgreementRule {
    fn from(config: &AgreementRuleConfig) -> Self {
        Self::new(config.pattern.clone(), config.suggestion.clone())
    }
}

/// Exact-substring grammar rules. Not inferential: a rule fires only on its
/// literal, case-sensitive text.
pub struct GrammarAgreementDetector {
    rules: Vec<AgreementRule>,
}

impl GrammarAgreementDetector {
    pub const NAME: &'static str = "GrammarAgreement";

    pub fn new(rules: Vec<AgreementRule>) -> Self {
        // an empty pattern would match between every character
        let rules = rules
            .into_iter()
            .filter(|rule| {
                if rule.pattern.is_empty() {
                    tracing::warn!(suggestion = %rule.suggestion, "skipping agreement rule with empty pattern");
                }
                !rule.pattern.is_empty()
            })
            .collect();
        Self { rules }
    }

    pub fn from_config(rules: &[AgreementRuleConfig]) -> Self {
        Self::new(rules.iter().map(AgreementRule::from).collect())
    }

    pub fn rules(&self) -> &[AgreementRule] {
        &self.rules
    }
}

impl Detector for GrammarAgreementDetector {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn category(&self) -> IssueCategory {
        IssueCategory::GrammarAgreement
    }

    fn detect(&self, text: &str) -> Vec<Finding> {
        let mut findings = Vec::new();
        for rule in &self.rules {
            for (start, found) in text.match_indices(rule.pattern.as_str()) {
                findings.push(Finding::new(
                    self.category(),
                    Span::new(start, start + found.len()),
                    rule.suggestion.clone(),
                ));
            }
        }
        findings
    }
}
