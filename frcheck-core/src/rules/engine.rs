use crate::config::ScanConfig;
use crate::types::*;

use super::agreement::GrammarAgreementDetector;
use super::apostrophe::ApostropheDetector;
use super::guillemets::GuillemetSpacingDetector;
use super::nbsp::ColonSpacingDetector;
use super::phone::PhoneFormatDetector;

/// Detector names, in the order they run over each paragraph.
///
/// Issues within one line come out in this order, so it is part of the
/// report's contract.
pub const DETECTOR_ORDER: [&str; 5] = [
    ApostropheDetector::NAME,
    ColonSpacingDetector::NAME,
    PhoneFormatDetector::NAME,
    GrammarAgreementDetector::NAME,
    GuillemetSpacingDetector::NAME,
];

// Detectors are pure: the same text always yields the same findings, in
// left-to-right order of the matches.
pub trait Detector: Send + Sync {
    fn name(&self) -> &str;
    fn category(&self) -> IssueCategory;
    fn detect(&self, text: &str) -> Vec<Finding>;
}

/// Ordered set of detectors applied to every paragraph.
pub struct PatternLibrary {
    detectors: Vec<Box<dyn Detector>>,
}

impl PatternLibrary {
    /// All detectors with default agreement rules.
    pub fn standard() -> Self {
        Self::from_config(&ScanConfig::default())
    }

    /// Build the detectors enabled in `config`, always in `DETECTOR_ORDER`.
    pub fn from_config(config: &ScanConfig) -> Self {
        for rule in &config.pipeline.rules {
            if !DETECTOR_ORDER.contains(&rule.name.as_str()) {
                tracing::warn!(rule = %rule.name, "unknown detector in pipeline config, ignoring");
            }
        }

        let mut detectors: Vec<Box<dyn Detector>> = Vec::new();
        for name in DETECTOR_ORDER {
            if !config.pipeline.is_enabled(name) {
                tracing::info!(rule = name, "detector disabled by config");
                continue;
            }
            detectors.push(Self::build_detector(name, config));
        }

        Self { detectors }
    }

    fn build_detector(name: &str, config: &ScanConfig) -> Box<dyn Detector> {
        match name {
            ApostropheDetector::NAME => Box::new(ApostropheDetector::new()),
            ColonSpacingDetector::NAME => Box::new(ColonSpacingDetector::new()),
            PhoneFormatDetector::NAME => Box::new(PhoneFormatDetector::new()),
            GrammarAgreementDetector::NAME => Box::new(GrammarAgreementDetector::from_config(
                &config.agreement_rules,
            )),
            _ => Box::new(GuillemetSpacingDetector::new()),
        }
    }

    /// Custom library, for callers that bring their own detectors.
    pub fn with_detectors(detectors: Vec<Box<dyn Detector>>) -> Self {
        Self { detectors }
    }

    /// Run every detector over `text`; findings are grouped by detector, in library order.
    pub fn detect_all(&self, text: &str) -> Vec<Finding> {
        let mut findings = Vec::new();
        for detector in &self.detectors {
            let found = detector.detect(text);
            if !found.is_empty() {
                tracing::debug!(rule = detector.name(), count = found.len(), "detector matched");
            }
            findings.extend(found);
        }
        findings
    }

    pub fn detector_names(&self) -> Vec<&str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }
}

impl Default for PatternLibrary {
    fn default() -> Self {
        Self::standard()
    }
}
