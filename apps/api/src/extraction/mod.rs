//! Text extraction — converts an uploaded document of a declared type into
//! plain text.
//!
//! File type is taken from the declared content type accompanying the
//! upload, never sniffed from bytes. An unreadable document degrades to an
//! empty string (logged, not raised) so downstream prompt construction
//! never sees an absent field; only an unsupported declared type is a hard
//! error.

use thiserror::Error;
use tracing::warn;

mod docx;
mod pdf;

const PDF_CONTENT_TYPE: &str = "application/pdf";
const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const PLAIN_TEXT_CONTENT_TYPE: &str = "text/plain";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// The three supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

impl DocumentKind {
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            PDF_CONTENT_TYPE => Some(DocumentKind::Pdf),
            DOCX_CONTENT_TYPE => Some(DocumentKind::Docx),
            PLAIN_TEXT_CONTENT_TYPE => Some(DocumentKind::PlainText),
            _ => None,
        }
    }
}

/// Extracts plain text from an uploaded document.
///
/// Returns `ExtractError::UnsupportedFormat` for any declared type outside
/// the three supported ones; extraction is not attempted in that case.
pub fn extract_text(content_type: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    let kind = DocumentKind::from_content_type(content_type)
        .ok_or_else(|| ExtractError::UnsupportedFormat(content_type.to_string()))?;

    Ok(match kind {
        DocumentKind::Pdf => pdf::extract(bytes),
        DocumentKind::Docx => docx::extract(bytes),
        DocumentKind::PlainText => plain_text(bytes),
    })
}

/// Decodes the byte stream as UTF-8 text verbatim.
fn plain_text(bytes: &[u8]) -> String {
    match String::from_utf8(bytes.to_vec()) {
        Ok(text) => text,
        Err(e) => {
            warn!("Plain-text upload is not valid UTF-8: {e}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_dispatch() {
        assert_eq!(
            DocumentKind::from_content_type("application/pdf"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::from_content_type(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            ),
            Some(DocumentKind::Docx)
        );
        assert_eq!(
            DocumentKind::from_content_type("text/plain"),
            Some(DocumentKind::PlainText)
        );
        assert_eq!(DocumentKind::from_content_type("image/png"), None);
    }

    #[test]
    fn test_unsupported_type_is_rejected_without_extraction() {
        let result = extract_text("image/png", b"\x89PNG");
        assert!(matches!(
            result,
            Err(ExtractError::UnsupportedFormat(ref t)) if t == "image/png"
        ));
    }

    #[test]
    fn test_plain_text_decodes_verbatim() {
        let text = extract_text("text/plain", "5 years Python, AWS\n".as_bytes()).unwrap();
        assert_eq!(text, "5 years Python, AWS\n");
    }

    #[test]
    fn test_zero_byte_plain_text_yields_empty_string() {
        let text = extract_text("text/plain", b"").unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_invalid_utf8_degrades_to_empty_string() {
        let text = extract_text("text/plain", &[0xff, 0xfe, 0x80]).unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_unreadable_pdf_degrades_to_empty_string() {
        let text = extract_text("application/pdf", b"not a pdf at all").unwrap();
        assert_eq!(text, "");
    }

    #[test]
    fn test_unreadable_docx_degrades_to_empty_string() {
        let text = extract_text(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            b"not a zip archive",
        )
        .unwrap();
        assert_eq!(text, "");
    }
}
