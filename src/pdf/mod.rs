//! PDF text extraction

use std::path::Path;
use tracing::warn;

/// Source of plain text for a document
pub trait TextExtractor {
    /// Extracted text, or an empty string when nothing could be read
    fn extract_text(&self, path: &Path) -> String;
}

/// Extractor backed by `pdf-extract`
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_text(&self, path: &Path) -> String {
        // Malformed files can panic inside the parser
        let path_buf = path.to_path_buf();
        let result = std::panic::catch_unwind(move || pdf_extract::extract_text(&path_buf));

        match result {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!("Error reading PDF {}: {}", path.display(), e);
                String::new()
            }
            Err(_) => {
                warn!("PDF parser panicked on {}", path.display());
                String::new()
            }
        }
    }
}
