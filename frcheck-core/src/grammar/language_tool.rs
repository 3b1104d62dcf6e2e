//! LanguageTool HTTP client
//!
//! Talks to a LanguageTool-compatible server (`POST /v2/check`) with a
//! blocking `ureq` agent. Offsets in LanguageTool responses are UTF-16 code
//! units (the server is a Java application) and are converted to byte spans
//! here, so the rest of the crate only deals with byte offsets.

use std::time::Duration;

use serde::Deserialize;

use super::{GrammarChecker, GrammarMatch};
use crate::config::GrammarServiceConfig;
use crate::error::GrammarError;
use crate::types::Span;

/// Response bodies echoed into errors are cut to this many characters.
const MAX_ERROR_BODY_CHARS: usize = 200;

pub struct LanguageToolClient {
    agent: ureq::Agent,
    check_url: String,
    language: String,
    disabled_rules: Vec<String>,
}

impl LanguageToolClient {
    pub fn new(config: &GrammarServiceConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();

        Self {
            agent,
            check_url: check_url(&config.endpoint),
            language: config.language.clone(),
            disabled_rules: config.disabled_rules.clone(),
        }
    }

    pub fn check_url(&self) -> &str {
        &self.check_url
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    fn request_error(&self, error: ureq::Error) -> GrammarError {
        match error {
            ureq::Error::Status(status, response) => {
                let body = response.into_string().unwrap_or_default();
                GrammarError::Status {
                    endpoint: self.check_url.clone(),
                    status,
                    body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
                }
            }
            ureq::Error::Transport(transport) => GrammarError::Transport {
                endpoint: self.check_url.clone(),
                reason: transport.to_string(),
            },
        }
    }
}

impl GrammarChecker for LanguageToolClient {
    fn name(&self) -> &str {
        "LanguageTool"
    }

    fn check(&self, text: &str) -> Result<Vec<GrammarMatch>, GrammarError> {
        let disabled_rules = self.disabled_rules.join(",");
        let mut form = vec![("language", self.language.as_str()), ("text", text)];
        if !disabled_rules.is_empty() {
            form.push(("disabledRules", disabled_rules.as_str()));
        }

        tracing::debug!(url = %self.check_url, chars = text.chars().count(), "grammar request");

        let response = self
            .agent
            .post(&self.check_url)
            .send_form(&form)
            .map_err(|e| self.request_error(e))?;

        let body = response
            .into_string()
            .map_err(|e| GrammarError::Transport {
                endpoint: self.check_url.clone(),
                reason: format!("failed to read response body: {e}"),
            })?;

        parse_check_response(&self.check_url, &body, text)
    }
}

fn check_url(endpoint: &str) -> String {
    let base = endpoint.trim_end_matches('/');
    if base.ends_with("/v2/check") {
        base.to_string()
    } else {
        format!("{base}/v2/check")
    }
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    matches: Vec<RawMatch>,
}

#[derive(Debug, Deserialize)]
struct RawMatch {
    message: String,
    offset: usize,
    length: usize,
    #[serde(default)]
    rule: Option<RawRule>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    id: String,
}

/// Parse a `/v2/check` body. A body without a `matches` array is an error,
/// not an empty result.
pub(crate) fn parse_check_response(
    endpoint: &str,
    body: &str,
    text: &str,
) -> Result<Vec<GrammarMatch>, GrammarError> {
    let response: CheckResponse =
        serde_json::from_str(body).map_err(|e| GrammarError::MalformedResponse {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;

    Ok(response
        .matches
        .into_iter()
        .map(|raw| GrammarMatch {
            message: raw.message,
            span: utf16_span_to_bytes(text, raw.offset, raw.length),
            rule_id: raw.rule.map(|r| r.id),
        })
        .collect())
}

/// Convert a UTF-16 `(offset, length)` pair into a byte span of `text`,
/// clipping anything past the end.
pub fn utf16_span_to_bytes(text: &str, offset: usize, length: usize) -> Span {
    let end_units = offset.saturating_add(length);
    let mut units = 0usize;
    let mut start = None;
    let mut end = None;

    for (idx, ch) in text.char_indices() {
        if start.is_none() && units >= offset {
            start = Some(idx);
        }
        if units >= end_units {
            end = Some(idx);
            break;
        }
        units += ch.len_utf16();
    }

    let start = start.unwrap_or(text.len());
    Span::new(start, end.unwrap_or(text.len()))
}
