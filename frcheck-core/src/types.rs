use serde::{Deserialize, Serialize};
use std::fmt;

/// Line number used for issues that cannot be tied to a single paragraph
/// (whole-document grammar analysis).
pub const DOCUMENT_LEVEL_LINE: u32 = 0;

/// Number of non-empty paragraphs counted as one page.
pub const DEFAULT_PAGE_SIZE: u32 = 40;

// ===== INPUT TYPES =====

/// A non-empty paragraph of the source document.
///
/// `line` is 1-indexed and only counts non-empty paragraphs: blank paragraphs
/// are dropped before numbering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub line: u32,
    pub text: String,
}

impl Paragraph {
    /// Number the non-empty paragraphs of a document, trimming each one.
    pub fn index<S: AsRef<str>>(raw: &[S]) -> Vec<Paragraph> {
        raw.iter()
            .map(|text| text.as_ref().trim())
            .filter(|text| !text.is_empty())
            .enumerate()
            .map(|(index, text)| Paragraph {
                line: index as u32 + 1,
                text: text.to_string(),
            })
            .collect()
    }

    /// Page this paragraph falls on for the given starting page.
    pub fn page(&self, page_offset: u32, page_size: u32) -> u32 {
        page_for_line(page_offset, self.line, page_size)
    }
}

/// `page_offset + line / page_size`, the pagination used by the report.
///
/// A zero page size is treated as one page per paragraph rather than panicking.
/// Saturates at `u32::MAX`; runs reject offsets that would get there, see
/// [`checked_page_for_line`].
pub fn page_for_line(page_offset: u32, line: u32, page_size: u32) -> u32 {
    page_offset.saturating_add(line / page_size.max(1))
}

/// Like [`page_for_line`], but `None` when the page number does not fit in a `u32`.
pub fn checked_page_for_line(page_offset: u32, line: u32, page_size: u32) -> Option<u32> {
    page_offset.checked_add(line / page_size.max(1))
}

// ===== MATCH TYPES =====

/// Half-open byte range `[start, end)` into a paragraph's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<regex::Match<'_>> for Span {
    fn from(m: regex::Match<'_>) -> Self {
        Self::new(m.start(), m.end())
    }
}

/// Raw output of a detector, before page/line attribution and context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub category: IssueCategory,
    pub span: Span,
    pub note: String,
}

impl Finding {
    pub fn new(category: IssueCategory, span: Span, note: impl Into<String>) -> Self {
        Self {
            category,
            span,
            note: note.into(),
        }
    }
}

// ===== OUTPUT TYPES =====

/// Fixed set of issue categories. Serialized with the labels shown in the
/// report's "Issue Category" column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IssueCategory {
    #[serde(rename = "Apostrophe")]
    Apostrophe,
    #[serde(rename = "Non-breaking space")]
    NonBreakingSpace,
    #[serde(rename = "Phone number format")]
    PhoneFormat,
    #[serde(rename = "Grammar agreement")]
    GrammarAgreement,
    #[serde(rename = "Guillemets spacing")]
    GuillemetSpacing,
    /// Reported by the external grammar service
    #[serde(rename = "Grammar")]
    Grammar,
}

impl IssueCategory {
    pub const ALL: [IssueCategory; 6] = [
        IssueCategory::Apostrophe,
        IssueCategory::NonBreakingSpace,
        IssueCategory::PhoneFormat,
        IssueCategory::GrammarAgreement,
        IssueCategory::GuillemetSpacing,
        IssueCategory::Grammar,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            IssueCategory::Apostrophe => "Apostrophe",
            IssueCategory::NonBreakingSpace => "Non-breaking space",
            IssueCategory::PhoneFormat => "Phone number format",
            IssueCategory::GrammarAgreement => "Grammar agreement",
            IssueCategory::GuillemetSpacing => "Guillemets spacing",
            IssueCategory::Grammar => "Grammar",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the QA report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub page: u32,
    pub line: u32,
    pub category: IssueCategory,
    pub note: String,
    pub context: String,
}

impl Issue {
    pub fn is_document_level(&self) -> bool {
        self.line == DOCUMENT_LEVEL_LINE
    }
}
