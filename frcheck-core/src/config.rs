use crate::context::DEFAULT_CONTEXT_RADIUS;
use crate::types::DEFAULT_PAGE_SIZE;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// Default value functions for serde
fn default_true() -> bool {
    true
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_context_radius() -> usize {
    DEFAULT_CONTEXT_RADIUS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Non-empty paragraphs per report page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Characters of context kept on each side of a match
    #[serde(default = "default_context_radius")]
    pub context_radius: usize,
    /// Which detectors run. Order is fixed by the pattern library; this only toggles them.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Exact-substring agreement rules and their suggested corrections
    #[serde(default = "default_agreement_rules")]
    pub agreement_rules: Vec<AgreementRuleConfig>,
    /// External grammar service
    #[serde(default)]
    pub grammar: GrammarServiceConfig,
    /// How .docx bodies are read
    #[serde(default)]
    pub docx: DocxConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocxConfig {
    /// Also scan paragraphs inside table cells. Off by default: only body
    /// paragraphs are numbered, so line numbers match the document outline.
    #[serde(default)]
    pub include_tables: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Detector toggles by name. Detectors not listed stay enabled.
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Name of the detector (e.g. "Apostrophe", "PhoneFormat")
    pub name: String,
    /// Whether this detector runs
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl PipelineConfig {
    /// A detector is enabled unless the last entry naming it says otherwise.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.name == name)
            .map(|rule| rule.enabled)
            .unwrap_or(true)
    }

    pub fn set_enabled(&mut self, name: &str, enabled: bool) {
        self.rules.push(RuleConfig {
            name: name.to_string(),
            enabled,
        });
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgreementRuleConfig {
    /// Literal text to look for (case-sensitive)
    pub pattern: String,
    /// Note shown in the report when the pattern is found
    pub suggestion: String,
}

fn default_agreement_rules() -> Vec<AgreementRuleConfig> {
    vec![AgreementRuleConfig {
        pattern: "tout polluants constaté".to_string(),
        suggestion: "Should be 'tous les polluants constatés'".to_string(),
    }]
}

/// How text is submitted to the grammar service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrammarMode {
    /// One request per paragraph; issues keep their page and line.
    #[default]
    PerParagraph,
    /// One request for the joined document; issues land on the start page, line 0.
    WholeDocument,
}

fn default_endpoint() -> String {
    "https://api.languagetool.org".to_string()
}

fn default_language() -> String {
    "fr-CA".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarServiceConfig {
    /// Whether the grammar service is consulted at all
    #[serde(default)]
    pub enabled: bool,
    /// Base URL of a LanguageTool-compatible server (without /v2/check)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Locale variant sent with every request
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub mode: GrammarMode,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Service rule ids to switch off (e.g. typography rules already covered locally)
    #[serde(default)]
    pub disabled_rules: Vec<String>,
}

impl Default for GrammarServiceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            language: default_language(),
            mode: GrammarMode::default(),
            timeout_secs: default_timeout_secs(),
            disabled_rules: Vec::new(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            context_radius: default_context_radius(),
            pipeline: PipelineConfig::default(),
            agreement_rules: default_agreement_rules(),
            grammar: GrammarServiceConfig::default(),
            docx: DocxConfig::default(),
        }
    }
}

impl ScanConfig {
    /// Load config from a YAML file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid config file: {path}"))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: ScanConfig = serde_yaml::from_str(content)?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load config with fallback to default
    pub fn load_with_fallback(path: Option<&str>) -> Self {
        match path {
            Some(p) => Self::load_from_file(p).unwrap_or_else(|e| {
                tracing::warn!(path = p, error = %e, "failed to load config, using defaults");
                Self::default()
            }),
            None => Self::default(),
        }
    }
}
