//! PDF text extraction using `lopdf`.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use lopdf::Document as PdfDocument;
use tracing::{debug, info, trace, warn};

use studygenie_core::logging::SUBSYSTEM_EXTRACT;
use studygenie_core::{Error, Result};

/// Message returned when a PDF parses but carries no text layer.
pub const NO_TEXT_MESSAGE: &str = "No text found in PDF";

/// Extracts the text layer of a PDF, page by page.
///
/// Pages are joined with newlines and the whole result is trimmed. Pages
/// that fail to decode are skipped; if nothing is left the document is
/// reported as empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract text on the blocking pool.
    pub async fn extract(&self, data: Vec<u8>, filename: &str) -> Result<String> {
        let start = Instant::now();
        let name = filename.to_string();
        let text = tokio::task::spawn_blocking(move || extract_text_blocking(&data))
            .await
            .map_err(|e| Error::Internal(format!("PDF extraction task failed: {}", e)))??;

        info!(
            subsystem = SUBSYSTEM_EXTRACT,
            component = "pdf_text",
            op = "extract",
            filename = %name,
            response_len = text.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Extracted PDF text"
        );
        Ok(text)
    }
}

/// Synchronous extraction used by [`PdfTextExtractor::extract`].
pub fn extract_text_blocking(data: &[u8]) -> Result<String> {
    if data.len() < 4 || &data[0..4] != b"%PDF" {
        return Err(Error::Extraction(
            "file is not a valid PDF (missing %PDF header)".to_string(),
        ));
    }

    // lopdf can panic on some malformed cross-reference tables
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| read_pages(data)));
    let text = match outcome {
        Ok(result) => result?,
        Err(_) => {
            warn!(
                subsystem = SUBSYSTEM_EXTRACT,
                component = "pdf_text",
                "PDF parser panicked"
            );
            return Err(Error::Extraction("PDF parser crashed on this file".to_string()));
        }
    };

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyDocument(NO_TEXT_MESSAGE.to_string()));
    }
    Ok(trimmed.to_string())
}

fn read_pages(data: &[u8]) -> Result<String> {
    let doc = PdfDocument::load_mem(data).map_err(|e| Error::Extraction(e.to_string()))?;

    let pages = doc.get_pages();
    debug!(
        subsystem = SUBSYSTEM_EXTRACT,
        component = "pdf_text",
        page_count = pages.len(),
        "Loaded PDF"
    );

    let mut text = String::new();
    for page_num in pages.keys() {
        match doc.extract_text(&[*page_num]) {
            Ok(page_text) => {
                trace!(page = page_num, chars = page_text.len(), "Extracted page");
                text.push_str(&page_text);
                text.push('\n');
            }
            Err(e) => {
                warn!(
                    subsystem = SUBSYSTEM_EXTRACT,
                    component = "pdf_text",
                    page = page_num,
                    error = %e,
                    "Skipping unreadable page"
                );
            }
        }
    }
    Ok(text)
}
