// QA report output
//
// A finished run wrapped with metadata, written either as pretty JSON or as a
// plain-text table with the columns of the printed report.

use crate::aggregator::IssueLog;
use crate::config::GrammarMode;
use crate::types::*;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

const TABLE_HEADERS: [&str; 5] = ["Page", "Line", "Issue Category", "Note", "Context"];

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub run_id: Uuid,
    /// Input file (or other label) the paragraphs came from
    pub source: String,
    pub page_offset: u32,
    pub generated_at: DateTime<Utc>,
    /// `None` when no grammar service was consulted
    pub grammar_mode: Option<GrammarMode>,
    pub total_issues: usize,
    pub counts_by_category: BTreeMap<IssueCategory, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QaReport {
    pub metadata: ReportMetadata,
    pub issues: Vec<Issue>,
}

impl QaReport {
    pub fn new(
        source: impl Into<String>,
        page_offset: u32,
        grammar_mode: Option<GrammarMode>,
        log: IssueLog,
    ) -> Self {
        let metadata = ReportMetadata {
            run_id: Uuid::new_v4(),
            source: source.into(),
            page_offset,
            generated_at: Utc::now(),
            grammar_mode,
            total_issues: log.len(),
            counts_by_category: log.counts_by_category(),
        };

        Self {
            metadata,
            issues: log.into_issues(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Plain-text table, one row per issue in report order.
    pub fn to_table(&self) -> String {
        let rows: Vec<[String; 5]> = self
            .issues
            .iter()
            .map(|issue| {
                [
                    issue.page.to_string(),
                    issue.line.to_string(),
                    issue.category.label().to_string(),
                    single_line(&issue.note),
                    single_line(&issue.context),
                ]
            })
            .collect();

        let mut widths = TABLE_HEADERS.map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        out.push_str(&format_row(&TABLE_HEADERS, &widths));
        out.push_str(&format_row(&widths.map(|w| "-".repeat(w)), &widths));
        for row in &rows {
            out.push_str(&format_row(row, &widths));
        }

        out.push('\n');
        out.push_str(&format!("Total issues: {}\n", self.metadata.total_issues));
        for (category, count) in &self.metadata.counts_by_category {
            out.push_str(&format!("  {category}: {count}\n"));
        }
        out
    }

    /// Write the report as `json` or `table`; any other format falls back to JSON.
    pub fn save_with_format(&self, path: &str, format: &str) -> Result<()> {
        let content = match format {
            "table" | "txt" => self.to_table(),
            _ => self.to_json()?,
        };
        std::fs::write(path, content).with_context(|| format!("Failed to write report: {path}"))?;
        Ok(())
    }
}

// Docx paragraphs can carry line breaks and tabs; a table row must not.
fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
        .collect()
}

fn format_row<S: AsRef<str>>(cells: &[S], widths: &[usize; 5]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell.as_ref(), width = *width))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("{}\n", line.trim_end())
}
