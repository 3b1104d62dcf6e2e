// frcheck Core Library
//
// French-Canadian typography QA: pattern detectors run over each paragraph of a
// document, optionally merged with an external grammar service, producing an
// ordered issue report with page, line and context attribution.

pub mod types;
pub mod error;
pub mod config;
pub mod context;
pub mod rules;
pub mod scanner;
pub mod grammar;
pub mod aggregator;
pub mod preprocessors;
pub mod processor;
pub mod report;

// Re-export main types and functions for easy use
pub use types::*;
pub use aggregator::IssueLog;
pub use config::{DocxConfig, GrammarMode, GrammarServiceConfig, ScanConfig};
pub use error::{GrammarError, InputError, QaError};
pub use grammar::{GrammarChecker, GrammarMatch, LanguageToolClient};
pub use preprocessors::{
    preprocessor_for, preprocessor_with, DocxPreprocessor, Preprocessor, TextPreprocessor,
};
pub use processor::{scan, DocumentChecker};
pub use report::QaReport;
pub use rules::PatternLibrary;
