//! HTTP handlers for the StudyGenie API.

pub mod chat;
pub mod documents;
pub mod study_materials;

use axum::response::IntoResponse;
use axum::Json;

pub use chat::{chat_with_document, get_chat_history};
pub use documents::{list_documents, upload_document};
pub use study_materials::get_study_materials;

/// `GET /api/`
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "StudyGenie API is running!",
    }))
}

/// `GET /health`
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
