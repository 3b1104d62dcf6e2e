// Paragraph scanner
//
// Runs the pattern library over each paragraph in document order and turns
// findings into report issues with page, line and context attached.

use crate::config::ScanConfig;
use crate::context::extract_context;
use crate::rules::PatternLibrary;
use crate::types::*;

pub struct ParagraphScanner<'a> {
    library: &'a PatternLibrary,
    page_offset: u32,
    page_size: u32,
    context_radius: usize,
}

impl<'a> ParagraphScanner<'a> {
    pub fn new(library: &'a PatternLibrary, config: &ScanConfig, page_offset: u32) -> Self {
        Self {
            library,
            page_offset,
            page_size: config.page_size,
            context_radius: config.context_radius,
        }
    }

    pub fn page_of(&self, paragraph: &Paragraph) -> u32 {
        paragraph.page(self.page_offset, self.page_size)
    }

    /// Issues for one paragraph, in detector order.
    pub fn scan_paragraph(&self, paragraph: &Paragraph) -> Vec<Issue> {
        let page = self.page_of(paragraph);

        self.library
            .detect_all(&paragraph.text)
            .into_iter()
            .map(|finding| Issue {
                page,
                line: paragraph.line,
                category: finding.category,
                context: extract_context(&paragraph.text, finding.span, self.context_radius),
                note: finding.note,
            })
            .collect()
    }

    /// Issues for every paragraph, in paragraph order.
    pub fn scan(&self, paragraphs: &[Paragraph]) -> Vec<Issue> {
        paragraphs
            .iter()
            .flat_map(|paragraph| self.scan_paragraph(paragraph))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_raw(raw: &[&str], page_offset: u32) -> Vec<Issue> {
        let library = PatternLibrary::standard();
        let config = ScanConfig::default();
        let scanner = ParagraphScanner::new(&library, &config, page_offset);
        scanner.scan(&Paragraph::index(raw))
    }

    #[test]
    fn test_issue_carries_line_page_and_context() {
        let issues = scan_raw(&["", "Titre", "Voici l'école."], 3);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 2);
        assert_eq!(issues[0].page, 3);
        assert_eq!(issues[0].category, IssueCategory::Apostrophe);
        assert_eq!(issues[0].context, "...Voici l'école....");
    }

    #[test]
    fn test_page_rolls_over_every_forty_lines() {
        let raw: Vec<String> = (1..=45).map(|i| format!("Ligne {i}: texte")).collect();
        let raw: Vec<&str> = raw.iter().map(String::as_str).collect();
        let issues = scan_raw(&raw, 5);

        assert_eq!(issues.len(), 45);
        assert_eq!(issues[0].page, 5);
        assert_eq!(issues[38].line, 39);
        assert_eq!(issues[38].page, 5);
        assert_eq!(issues[40].line, 41);
        assert_eq!(issues[40].page, 6);
        assert!(issues.windows(2).all(|w| w[0].page <= w[1].page));
    }

    #[test]
    fn test_custom_page_size_and_radius() {
        let library = PatternLibrary::standard();
        let config = ScanConfig {
            page_size: 2,
            context_radius: 3,
            ..ScanConfig::default()
        };
        let scanner = ParagraphScanner::new(&library, &config, 1);
        let issues = scanner.scan(&Paragraph::index(&["a", "b", "Un exemple: simple"]));

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].page, 2);
        assert_eq!(issues[0].context, "...ple: si...");
    }
}
