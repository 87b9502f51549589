//! Word (.docx) text extraction using zip + quick-xml.
//!
//! Reads `word/document.xml` and returns one trimmed line per paragraph.
//! Explicit breaks (`w:br`, `w:cr`) split a paragraph into several lines,
//! tabs become spaces. Only `w:t` runs contribute text, so deleted text and
//! field instructions are ignored.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use zip::ZipArchive;

use crate::error::DecodeError;

const DOCUMENT_XML: &str = "word/document.xml";

/// Extract the non-empty, trimmed text lines of a .docx document
pub fn extract_lines(bytes: &[u8]) -> Result<Vec<String>, DecodeError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;

    let xml_content = {
        let mut document_xml = archive.by_name(DOCUMENT_XML)?;
        let mut content = String::new();
        document_xml.read_to_string(&mut content)?;
        content
    };

    let lines = lines_from_document_xml(&xml_content)?;
    debug!(lines = lines.len(), "Extracted Word lines");
    Ok(lines)
}

/// Walk the body XML and collect paragraph text
fn lines_from_document_xml(xml: &str) -> Result<Vec<String>, DecodeError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:t" => in_text = true,
                b"w:p" => flush_line(&mut current, &mut lines),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => current.push(' '),
                b"w:br" | b"w:cr" => flush_line(&mut current, &mut lines),
                _ => {}
            },
            Event::Text(e) if in_text => {
                current.push_str(&e.unescape()?);
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => flush_line(&mut current, &mut lines),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    flush_line(&mut current, &mut lines);

    Ok(lines)
}

fn flush_line(current: &mut String, lines: &mut Vec<String>) {
    let line = current.trim();
    if !line.is_empty() {
        lines.push(line.to_string());
    }
    current.clear();
}
