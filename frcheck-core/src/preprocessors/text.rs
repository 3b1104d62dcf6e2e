use super::preprocessor::{has_extension, Preprocessor};
use crate::error::InputError;
use std::path::Path;

/// Plain UTF-8 text: one paragraph per line.
pub struct TextPreprocessor;

impl TextPreprocessor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Preprocessor for TextPreprocessor {
    fn extract_paragraphs(&self, bytes: &[u8]) -> Result<Vec<String>, InputError> {
        let text = std::str::from_utf8(bytes).map_err(|e| InputError::Encoding(e.to_string()))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Ok(text.lines().map(str::to_string).collect())
    }

    fn name(&self) -> &str {
        "text"
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        has_extension(path, &["txt", "text"])
    }
}
