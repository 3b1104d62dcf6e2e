//! Document Preprocessors
//!
//! Turn a source document into the ordered list of paragraph strings the
//! scanner works on.
//!
//! ```text
//! Document (.docx, .txt)
//!     ↓
//! [Format-specific Preprocessor]
//!     ↓
//! Vec<String> (one entry per paragraph, blank ones included)
//!     ↓
//! [ParagraphScanner]
//! ```
//!
//! Blank paragraphs are kept here; dropping them and numbering lines is the
//! scanner's job.

pub mod docx;
pub mod preprocessor;
pub mod text;

pub use docx::DocxPreprocessor;
pub use preprocessor::{preprocessor_for, preprocessor_with, Preprocessor};
pub use text::TextPreprocessor;
