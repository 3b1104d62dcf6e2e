// Preprocessor abstraction
//
// Everything after this boundary works on plain paragraph strings and does not
// care which format the document came from.

use super::{DocxPreprocessor, TextPreprocessor};
use crate::config::DocxConfig;
use crate::error::InputError;
use std::path::Path;

pub trait Preprocessor {
    /// Extract paragraphs, in document order, from the raw file bytes.
    fn extract_paragraphs(&self, bytes: &[u8]) -> Result<Vec<String>, InputError>;

    /// Read `input` and extract its paragraphs.
    fn process_file(&self, input: &Path) -> Result<Vec<String>, InputError> {
        let bytes = std::fs::read(input).map_err(|source| InputError::Io {
            path: input.display().to_string(),
            source,
        })?;
        self.extract_paragraphs(&bytes)
    }

    /// Get preprocessor name for logging
    fn name(&self) -> &str;

    /// Check if preprocessor supports the given file type
    fn supports_file_type(&self, path: &Path) -> bool;
}

/// Pick a preprocessor from the file extension, with default reading options.
pub fn preprocessor_for(path: &Path) -> Result<Box<dyn Preprocessor>, InputError> {
    preprocessor_with(path, &DocxConfig::default())
}

pub fn preprocessor_with(
    path: &Path,
    docx: &DocxConfig,
) -> Result<Box<dyn Preprocessor>, InputError> {
    let candidates: Vec<Box<dyn Preprocessor>> = vec![
        Box::new(DocxPreprocessor::with_tables(docx.include_tables)),
        Box::new(TextPreprocessor::new()),
    ];

    candidates
        .into_iter()
        .find(|p| p.supports_file_type(path))
        .ok_or_else(|| InputError::Unsupported(path.display().to_string()))
}

pub(crate) fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}
