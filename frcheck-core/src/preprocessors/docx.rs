//! DOCX paragraph extraction
//!
//! A .docx file is a zip archive; the body text lives in `word/document.xml`
//! as WordprocessingML. Every `w:p` element becomes one paragraph, in document
//! order. Paragraphs inside tables (`w:tbl`) are skipped unless the
//! preprocessor is built with `with_tables(true)`. Text boxes appear twice in
//! the markup (`mc:Choice` and its `mc:Fallback` copy); only the first is read.
//! Within a paragraph:
//! - `w:t` contributes its text
//! - `w:tab` becomes `\t`, `w:br` / `w:cr` become `\n`
//! - `w:noBreakHyphen` becomes U+2011 so correctly typed phone numbers are not flagged
//! - deleted text (`w:delText`), field codes (`w:instrText`) and tab stop
//!   definitions inside `w:pPr` are ignored

use super::preprocessor::{has_extension, Preprocessor};
use crate::error::InputError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::path::Path;

const DOCUMENT_PART: &str = "word/document.xml";

const NON_BREAKING_HYPHEN: char = '\u{2011}';

pub struct DocxPreprocessor {
    include_tables: bool,
}

impl DocxPreprocessor {
    /// Body paragraphs only.
    pub fn new() -> Self {
        Self::with_tables(false)
    }

    pub fn with_tables(include_tables: bool) -> Self {
        Self { include_tables }
    }
}

impl Default for DocxPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Preprocessor for DocxPreprocessor {
    fn extract_paragraphs(&self, bytes: &[u8]) -> Result<Vec<String>, InputError> {
        let xml = read_document_part(bytes)?;
        let paragraphs = parse_document_xml(&xml, self.include_tables)?;
        tracing::info!(
            paragraphs = paragraphs.len(),
            include_tables = self.include_tables,
            "docx paragraphs extracted"
        );
        Ok(paragraphs)
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        has_extension(path, &["docx"])
    }
}

/// Pull `word/document.xml` out of the archive.
fn read_document_part(bytes: &[u8]) -> Result<String, InputError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut part = archive.by_name(DOCUMENT_PART)?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| InputError::Encoding(format!("{DOCUMENT_PART}: {e}")))?;
    Ok(xml)
}

/// Paragraph texts of a WordprocessingML body, in document order.
pub fn parse_document_xml(xml: &str, include_tables: bool) -> Result<Vec<String>, InputError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    // Text boxes can nest a w:p inside another one; the inner paragraph is
    // emitted when it closes, before its parent.
    let mut open: Vec<String> = Vec::new();
    let mut in_text = false;
    let mut in_paragraph_props = false;
    let mut skipped = SkippedContent::default();

    loop {
        let event = reader.read_event()?;
        if skipped.track(&event, include_tables) {
            continue;
        }

        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => open.push(String::new()),
                b"w:pPr" => in_paragraph_props = true,
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => {
                let special = match e.name().as_ref() {
                    b"w:p" => {
                        paragraphs.push(String::new());
                        None
                    }
                    b"w:tab" if !in_paragraph_props => Some('\t'),
                    b"w:br" | b"w:cr" => Some('\n'),
                    b"w:noBreakHyphen" => Some(NON_BREAKING_HYPHEN),
                    _ => None,
                };
                if let (Some(ch), Some(current)) = (special, open.last_mut()) {
                    current.push(ch);
                }
            }
            Event::Text(e) if in_text => {
                let text = e.unescape()?;
                if let Some(current) = open.last_mut() {
                    current.push_str(&text);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:p" => {
                    if let Some(paragraph) = open.pop() {
                        paragraphs.push(paragraph);
                    }
                }
                b"w:pPr" => in_paragraph_props = false,
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Nesting depth of the regions whose paragraphs are not read.
#[derive(Default)]
struct SkippedContent {
    fallback: usize,
    table: usize,
}

impl SkippedContent {
    /// Update depths for `event`; true when the event lies in skipped content.
    fn track(&mut self, event: &Event<'_>, include_tables: bool) -> bool {
        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"mc:Fallback" => self.fallback += 1,
                b"w:tbl" if !include_tables => self.table += 1,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"mc:Fallback" => {
                    self.fallback = self.fallback.saturating_sub(1);
                    return true;
                }
                b"w:tbl" if !include_tables => {
                    self.table = self.table.saturating_sub(1);
                    return true;
                }
                _ => {}
            },
            Event::Eof => return false,
            _ => {}
        }
        self.fallback > 0 || self.table > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn body(inner: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{inner}</w:body></w:document>"#
        )
    }

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buffer);
            zip.start_file("[Content_Types].xml", zip::write::FileOptions::default())
                .unwrap();
            zip.write_all(b"<Types/>").unwrap();
            zip.start_file(DOCUMENT_PART, zip::write::FileOptions::default())
                .unwrap();
            zip.write_all(document_xml.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        buffer.into_inner()
    }

    #[test]
    fn test_runs_are_concatenated_per_paragraph() {
        let xml = body(
            r#"<w:p><w:r><w:t>Voici </w:t></w:r><w:r><w:t>l'école</w:t></w:r></w:p>
<w:p/>
<w:p><w:r><w:t xml:space="preserve">Note : fin</w:t></w:r></w:p>"#,
        );

        let paragraphs = parse_document_xml(&xml, false).unwrap();
        assert_eq!(paragraphs, vec!["Voici l'école", "", "Note : fin"]);
    }

    #[test]
    fn test_special_run_content() {
        let xml = body(
            r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>A</w:t><w:tab/><w:t>B</w:t><w:br/><w:t>613</w:t><w:noBreakHyphen/><w:t>555</w:t></w:r></w:p>"#,
        );

        let paragraphs = parse_document_xml(&xml, false).unwrap();
        assert_eq!(paragraphs, vec!["A\tB\n613\u{2011}555"]);
    }

    #[test]
    fn test_deleted_text_and_field_codes_are_ignored() {
        let xml = body(
            r#"<w:p><w:del><w:r><w:delText>ancien</w:delText></w:r></w:del><w:r><w:instrText> PAGE </w:instrText></w:r><w:r><w:t>nouveau</w:t></w:r></w:p>"#,
        );

        assert_eq!(parse_document_xml(&xml, false).unwrap(), vec!["nouveau"]);
    }

    #[test]
    fn test_entities_are_unescaped() {
        let xml = body(r#"<w:p><w:r><w:t>R&amp;D &lt;interne&gt;</w:t></w:r></w:p>"#);
        assert_eq!(parse_document_xml(&xml, false).unwrap(), vec!["R&D <interne>"]);
    }

    const TABLE_BODY: &str = r#"<w:p><w:r><w:t>Avant</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cellule 1</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>Cellule 2</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p><w:r><w:t>Après</w:t></w:r></w:p>"#;

    #[test]
    fn test_table_cells_are_skipped_by_default() {
        let xml = body(TABLE_BODY);
        assert_eq!(parse_document_xml(&xml, false).unwrap(), vec!["Avant", "Après"]);
    }

    #[test]
    fn test_table_cells_are_paragraphs_in_order_when_included() {
        let xml = body(TABLE_BODY);
        assert_eq!(
            parse_document_xml(&xml, true).unwrap(),
            vec!["Avant", "Cellule 1", "Cellule 2", "Après"]
        );
    }

    #[test]
    fn test_nested_table_is_skipped_whole() {
        let xml = body(
            r#"<w:tbl><w:tr><w:tc><w:tbl><w:tr><w:tc><w:p><w:r><w:t>Interne</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p><w:r><w:t>Externe</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p><w:r><w:t>Corps</w:t></w:r></w:p>"#,
        );
        assert_eq!(parse_document_xml(&xml, false).unwrap(), vec!["Corps"]);
        assert_eq!(
            parse_document_xml(&xml, true).unwrap(),
            vec!["Interne", "Externe", "Corps"]
        );
    }

    #[test]
    fn test_text_box_fallback_copy_is_not_read() {
        let text_box = r#"<w:txbxContent><w:p><w:r><w:t>Note: boite</w:t></w:r></w:p></w:txbxContent>"#;
        let xml = body(&format!(
            r#"<w:p><w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:drawing><wps:txbx>{text_box}</wps:txbx></w:drawing></mc:Choice><mc:Fallback><w:pict><v:textbox>{text_box}</v:textbox></w:pict></mc:Fallback></mc:AlternateContent></w:r><w:r><w:t>Corps</w:t></w:r></w:p>"#
        ));

        assert_eq!(
            parse_document_xml(&xml, false).unwrap(),
            vec!["Note: boite", "Corps"]
        );
    }

    #[test]
    fn test_preprocessor_honours_table_option() {
        let bytes = docx_bytes(&body(TABLE_BODY));
        assert_eq!(
            DocxPreprocessor::new().extract_paragraphs(&bytes).unwrap().len(),
            2
        );
        assert_eq!(
            DocxPreprocessor::with_tables(true)
                .extract_paragraphs(&bytes)
                .unwrap()
                .len(),
            4
        );
    }

    #[test]
    fn test_extracts_from_archive() {
        let bytes = docx_bytes(&body(r#"<w:p><w:r><w:t>«Bonjour»</w:t></w:r></w:p>"#));
        let paragraphs = DocxPreprocessor::new().extract_paragraphs(&bytes).unwrap();
        assert_eq!(paragraphs, vec!["«Bonjour»"]);
    }

    #[test]
    fn test_not_a_zip_is_an_input_error() {
        let err = DocxPreprocessor::new()
            .extract_paragraphs(b"plain text, not a docx")
            .unwrap_err();
        assert!(matches!(err, InputError::Archive(_)));
    }

    #[test]
    fn test_archive_without_document_part_is_an_input_error() {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut zip = zip::ZipWriter::new(&mut buffer);
            zip.start_file("word/styles.xml", zip::write::FileOptions::default())
                .unwrap();
            zip.write_all(b"<w:styles/>").unwrap();
            zip.finish().unwrap();
        }

        let err = DocxPreprocessor::new()
            .extract_paragraphs(&buffer.into_inner())
            .unwrap_err();
        assert!(matches!(err, InputError::Archive(_)));
    }

    #[test]
    fn test_malformed_xml_is_an_input_error() {
        let bytes = docx_bytes("<w:document><w:body><w:p></w:body>");
        let err = DocxPreprocessor::new().extract_paragraphs(&bytes).unwrap_err();
        assert!(matches!(err, InputError::Xml(_)));
    }
}
