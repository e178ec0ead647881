use tracing::warn;

/// Extracts the text of every page in document order. Pages with no
/// extractable text contribute nothing; an unreadable document yields an
/// empty string.
pub(super) fn extract(bytes: &[u8]) -> String {
    match pdf_extract::extract_text_from_mem(bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!("PDF extraction failed: {e}");
            String::new()
        }
    }
}
