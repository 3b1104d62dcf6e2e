//! External grammar service integration.
//!
//! The service itself is behind the [`GrammarChecker`] trait; the
//! [`GrammarAdapter`] turns its matches into report issues, either one
//! paragraph at a time (keeping page and line) or for the whole document at
//! once (everything attributed to the start page, line 0).
//!
//! Any service failure is returned as an error. It is never folded into an
//! empty result.

pub mod language_tool;

pub use language_tool::LanguageToolClient;

use crate::config::GrammarMode;
use crate::context::extract_context;
use crate::error::GrammarError;
use crate::types::*;

/// Paragraphs are joined with this separator in whole-document mode.
pub const DOCUMENT_SEPARATOR: &str = "\n";

/// One problem reported by the grammar service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarMatch {
    /// Human-readable message from the service
    pub message: String,
    /// Byte range into the submitted text
    pub span: Span,
    /// Service rule identifier, when provided
    pub rule_id: Option<String>,
}

/// A remote (or local) grammar checker scoped to one locale.
pub trait GrammarChecker {
    fn name(&self) -> &str;
    fn check(&self, text: &str) -> Result<Vec<GrammarMatch>, GrammarError>;
}

pub struct GrammarAdapter<'a> {
    checker: &'a dyn GrammarChecker,
    mode: GrammarMode,
    context_radius: usize,
}

impl<'a> GrammarAdapter<'a> {
    pub fn new(checker: &'a dyn GrammarChecker, mode: GrammarMode, context_radius: usize) -> Self {
        Self {
            checker,
            mode,
            context_radius,
        }
    }

    pub fn mode(&self) -> GrammarMode {
        self.mode
    }

    /// Check a single paragraph; issues keep the paragraph's page and line.
    pub fn paragraph_issues(
        &self,
        paragraph: &Paragraph,
        page: u32,
    ) -> Result<Vec<Issue>, GrammarError> {
        let matches = self.checker.check(&paragraph.text)?;
        Ok(self.to_issues(&paragraph.text, matches, page, paragraph.line))
    }

    /// Check the joined document in one request.
    ///
    /// Offsets refer to the joined text and are not mapped back to
    /// paragraphs: every issue gets `page_offset` and `DOCUMENT_LEVEL_LINE`.
    pub fn document_issues(
        &self,
        paragraphs: &[Paragraph],
        page_offset: u32,
    ) -> Result<Vec<Issue>, GrammarError> {
        if paragraphs.is_empty() {
            return Ok(Vec::new());
        }

        let joined = paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join(DOCUMENT_SEPARATOR);

        let matches = self.checker.check(&joined)?;
        Ok(self.to_issues(&joined, matches, page_offset, DOCUMENT_LEVEL_LINE))
    }

    fn to_issues(&self, text: &str, matches: Vec<GrammarMatch>, page: u32, line: u32) -> Vec<Issue> {
        tracing::debug!(
            checker = self.checker.name(),
            line,
            count = matches.len(),
            "grammar matches"
        );

        matches
            .into_iter()
            .map(|m| Issue {
                page,
                line,
                category: IssueCategory::Grammar,
                context: extract_context(text, m.span, self.context_radius),
                note: m.message,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Flags every occurrence of a word and records what it was sent.
    struct WordChecker {
        word: &'static str,
        requests: RefCell<Vec<String>>,
    }

    impl WordChecker {
        fn new(word: &'static str) -> Self {
            Self {
                word,
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl GrammarChecker for WordChecker {
        fn name(&self) -> &str {
            "word"
        }

        fn check(&self, text: &str) -> Result<Vec<GrammarMatch>, GrammarError> {
            self.requests.borrow_mut().push(text.to_string());
            Ok(text
                .match_indices(self.word)
                .map(|(start, w)| GrammarMatch {
                    message: format!("Vérifier « {w} »"),
                    span: Span::new(start, start + w.len()),
                    rule_id: None,
                })
                .collect())
        }
    }

    #[test]
    fn test_paragraph_issues_keep_line() {
        let checker = WordChecker::new("sont");
        let adapter = GrammarAdapter::new(&checker, GrammarMode::PerParagraph, 30);
        let paragraph = Paragraph {
            line: 7,
            text: "Les résultat sont prêts".to_string(),
        };

        let issues = adapter.paragraph_issues(&paragraph, 3).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].page, 3);
        assert_eq!(issues[0].line, 7);
        assert_eq!(issues[0].category, IssueCategory::Grammar);
        assert_eq!(issues[0].note, "Vérifier « sont »");
        assert_eq!(issues[0].context, "...Les résultat sont prêts...");
    }

    #[test]
    fn test_document_issues_use_start_page_and_sentinel_line() {
        let checker = WordChecker::new("sont");
        let adapter = GrammarAdapter::new(&checker, GrammarMode::WholeDocument, 30);
        let paragraphs = Paragraph::index(&["Ils sont là", "Elles sont ici"]);

        let issues = adapter.document_issues(&paragraphs, 4).unwrap();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().all(|i| i.page == 4 && i.is_document_level()));
        assert_eq!(
            *checker.requests.borrow(),
            vec!["Ils sont là\nElles sont ici".to_string()]
        );
    }

    #[test]
    fn test_empty_document_sends_no_request() {
        let checker = WordChecker::new("sont");
        let adapter = GrammarAdapter::new(&checker, GrammarMode::WholeDocument, 30);

        assert!(adapter.document_issues(&[], 1).unwrap().is_empty());
        assert!(checker.requests.borrow().is_empty());
    }
}
