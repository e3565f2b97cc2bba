//! Document upload and listing.
//!
//! An upload runs the whole pipeline in one request: extract text, store the
//! document, generate questions and flashcards, store them, and answer with
//! everything the client needs to start studying.

use std::time::Instant;

use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use studygenie_core::defaults::{LIST_LIMIT, PREVIEW_CHARS};
use studygenie_core::logging::SUBSYSTEM_API;
use studygenie_core::{truncate_chars, Document, DocumentSummary, Flashcard, MCQuestion};

use crate::{ApiError, AppState};

/// Response body for a processed upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub document_id: Uuid,
    pub filename: String,
    pub text_preview: String,
    pub mcqs: Vec<MCQuestion>,
    pub flashcards: Vec<Flashcard>,
    pub message: String,
}

/// First [`PREVIEW_CHARS`] characters, with an ellipsis when cut.
pub fn text_preview(text: &str) -> String {
    let head = truncate_chars(text, PREVIEW_CHARS);
    if head.len() < text.len() {
        format!("{}...", head)
    } else {
        head.to_string()
    }
}

fn is_pdf_filename(name: &str) -> bool {
    name.to_lowercase().ends_with(".pdf")
}

/// `POST /api/upload`
///
/// Multipart form with a `file` field holding a PDF.
///
/// # Returns
/// - 200 with the document id, a text preview, and the generated material
/// - 400 for a missing, non-PDF, empty, unreadable or text-free file
/// - 500 on storage or provider configuration failure
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let start = Instant::now();
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Read error: {}", e)))?;
        upload = Some((filename, data.to_vec()));
    }

    let (filename, data) = upload
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;

    if !is_pdf_filename(&filename) {
        return Err(ApiError::BadRequest(
            "Only PDF files are supported".to_string(),
        ));
    }
    if data.is_empty() {
        return Err(ApiError::BadRequest("Empty file".to_string()));
    }

    let size_bytes = data.len();
    let text = state.extractor.extract(data, &filename).await?;
    state.generator.ensure_ready()?;

    let doc = Document::new(filename, text);
    state.documents.insert(&doc).await?;

    let material = state
        .generator
        .generate_study_material(doc.id, &doc.content)
        .await?;
    state.study_materials.insert(&material).await?;

    info!(
        subsystem = SUBSYSTEM_API,
        op = "upload",
        document_id = %doc.id,
        size_bytes,
        mcq_count = material.mcqs.len(),
        flashcard_count = material.flashcards.len(),
        model = state.generator.model_name(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Document processed"
    );

    Ok(Json(UploadResponse {
        document_id: doc.id,
        text_preview: text_preview(&doc.content),
        filename: doc.filename,
        mcqs: material.mcqs,
        flashcards: material.flashcards,
        message: "Document processed successfully!".to_string(),
    }))
}

/// `GET /api/documents`
///
/// Oldest first, without document text.
pub async fn list_documents(
    State(state): State<AppState>,
) -> Result<Json<Vec<DocumentSummary>>, ApiError> {
    let documents = state.documents.list(LIST_LIMIT).await?;
    Ok(Json(documents))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(text_preview("short"), "short");
        let exact = "a".repeat(200);
        assert_eq!(text_preview(&exact), exact);
    }

    #[test]
    fn test_preview_truncates_with_ellipsis() {
        let long = "b".repeat(201);
        let preview = text_preview(&long);
        assert_eq!(preview, format!("{}...", "b".repeat(200)));
    }

    #[test]
    fn test_preview_multibyte() {
        let long = "é".repeat(250);
        let preview = text_preview(&long);
        assert_eq!(preview.chars().count(), 203);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn test_pdf_filename_check() {
        assert!(is_pdf_filename("notes.pdf"));
        assert!(is_pdf_filename("NOTES.PDF"));
        assert!(!is_pdf_filename("notes.txt"));
        assert!(!is_pdf_filename("pdf"));
    }
}
