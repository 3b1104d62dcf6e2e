use crate::types::*;
use serde::Serialize;
use std::collections::BTreeMap;

/// Append-only, ordered record of every issue a run produced.
///
/// Insertion order is the output order: nothing here sorts, merges or drops
/// issues, so report rows stay grouped by page and line the way they were
/// scanned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssueLog {
    issues: Vec<Issue>,
}

impl IssueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn extend<I: IntoIterator<Item = Issue>>(&mut self, issues: I) {
        self.issues.extend(issues);
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issue count per category, for report summaries. Categories with no
    /// issues are omitted.
    pub fn counts_by_category(&self) -> BTreeMap<IssueCategory, usize> {
        let mut counts = BTreeMap::new();
        for issue in &self.issues {
            *counts.entry(issue.category).or_insert(0) += 1;
        }
        counts
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

impl<'a> IntoIterator for &'a IssueLog {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}

impl IntoIterator for IssueLog {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}
