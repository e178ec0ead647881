//! DOCX text extraction.
//!
//! A DOCX file is a ZIP archive whose main content lives in
//! `word/document.xml`. Text runs sit in `w:t` elements inside `w:p`
//! paragraphs; paragraphs are emitted one per line in document order.
//! Manual ZIP + streaming XML parsing (docx-rs is writer-only).

use std::io::{Cursor, Read};

use anyhow::Result;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::warn;
use zip::ZipArchive;

/// Concatenates paragraph texts, one per line. An unreadable archive or
/// malformed XML yields an empty string.
pub(super) fn extract(bytes: &[u8]) -> String {
    match read_paragraphs(bytes) {
        Ok(paragraphs) => paragraphs.join("\n"),
        Err(e) => {
            warn!("DOCX extraction failed: {e}");
            String::new()
        }
    }
}

fn read_paragraphs(bytes: &[u8]) -> Result<Vec<String>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")?
        .read_to_string(&mut xml)?;
    paragraphs_from_xml(&xml)
}

fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Event::Empty(e) if e.name().as_ref() == b"w:p" => paragraphs.push(String::new()),
            Event::Text(t) if in_text_run => current.push_str(&t.unescape()?),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn docx_fixture(document_xml: &str) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = zip::ZipWriter::new(&mut cursor);
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap();
        cursor.into_inner()
    }

    const TWO_PARAGRAPHS: &str = r#"<?xml version="1.0"?>
        <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
          <w:body>
            <w:p><w:r><w:t>5 years Python, AWS</w:t></w:r></w:p>
            <w:p><w:r><w:t>Led a team of </w:t></w:r><w:r><w:t>four</w:t></w:r></w:p>
          </w:body>
        </w:document>"#;

    #[test]
    fn test_one_line_per_paragraph() {
        let bytes = docx_fixture(TWO_PARAGRAPHS);
        assert_eq!(extract(&bytes), "5 years Python, AWS\nLed a team of four");
    }

    #[test]
    fn test_empty_paragraph_contributes_empty_line() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
            <w:body>
              <w:p><w:r><w:t>Skills</w:t></w:r></w:p>
              <w:p/>
              <w:p><w:r><w:t>Rust</w:t></w:r></w:p>
            </w:body>
          </w:document>"#;
        let bytes = docx_fixture(xml);
        assert_eq!(extract(&bytes), "Skills\n\nRust");
    }

    #[test]
    fn test_entities_are_unescaped() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
            <w:body><w:p><w:r><w:t>C &amp; C++ developer</w:t></w:r></w:p></w:body>
          </w:document>"#;
        let bytes = docx_fixture(xml);
        assert_eq!(extract(&bytes), "C & C++ developer");
    }

    #[test]
    fn test_archive_without_document_xml_yields_empty() {
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = zip::ZipWriter::new(&mut cursor);
        writer
            .start_file("word/other.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<x/>").unwrap();
        writer.finish().unwrap();
        assert_eq!(extract(&cursor.into_inner()), "");
    }
}
