// Error taxonomy for a QA run.
//
// Input errors abort before any scanning. Grammar service errors abort the
// run as well: an empty issue list must only ever mean "no issues found".

use thiserror::Error;

/// The source document could not be turned into paragraphs.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported document type: {0} (expected .docx or .txt)")]
    Unsupported(String),

    #[error("not a valid .docx archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("malformed document XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("document is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("page offset must be at least 1 (got {0})")]
    InvalidPageOffset(u32),

    #[error("page numbers overflow: {paragraphs} paragraphs cannot start at page {page_offset}")]
    PageOverflow { page_offset: u32, paragraphs: usize },
}

/// The external grammar service failed; the run cannot be trusted.
#[derive(Debug, Clone, Error)]
pub enum GrammarError {
    #[error("could not reach {endpoint}: {reason}")]
    Transport { endpoint: String, reason: String },

    #[error("{endpoint} answered HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("unreadable response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },
}

/// Any fatal error of a QA run.
#[derive(Debug, Error)]
pub enum QaError {
    #[error("input error: {0}")]
    Input(#[from] InputError),

    #[error("grammar service unavailable: {0}")]
    GrammarService(#[from] GrammarError),
}

impl QaError {
    /// True when retrying the whole run later might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, QaError::GrammarService(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_failure_message_is_actionable() {
        let err = QaError::from(GrammarError::Transport {
            endpoint: "http://localhost:8081/v2/check".to_string(),
            reason: "connection refused".to_string(),
        });

        let message = err.to_string();
        assert!(message.starts_with("grammar service unavailable"));
        assert!(message.contains("localhost:8081"));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_input_errors_are_not_retryable() {
        let err = QaError::from(InputError::Unsupported("notes.pdf".to_string()));
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("notes.pdf"));
    }
}
