//! Chat against an uploaded document.

use std::time::Instant;

use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use studygenie_core::defaults::LIST_LIMIT;
use studygenie_core::logging::SUBSYSTEM_API;
use studygenie_core::{parse_id, ChatMessage};

use crate::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub document_id: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

/// `POST /api/chat`
///
/// Answers the question from the document text and appends the exchange to
/// the document's chat history.
pub async fn chat_with_document(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let start = Instant::now();
    let not_found = || ApiError::NotFound("Document not found".to_string());

    let id = parse_id(&req.document_id).ok_or_else(not_found)?;
    let doc = state.documents.fetch(id).await?.ok_or_else(not_found)?;

    let reply = state.generator.chat(&doc.content, &req.message).await?;

    let msg = ChatMessage::new(doc.id, req.message, reply);
    state.chat_messages.insert(&msg).await?;

    info!(
        subsystem = SUBSYSTEM_API,
        op = "chat",
        document_id = %doc.id,
        response_len = msg.ai_response.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Chat answered"
    );

    Ok(Json(ChatResponse {
        response: msg.ai_response,
        timestamp: msg.timestamp,
    }))
}

/// `GET /api/chat-history/:document_id`
///
/// Oldest first. Unknown documents have an empty history.
pub async fn get_chat_history(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<Json<Vec<ChatMessage>>, ApiError> {
    let Some(id) = parse_id(&document_id) else {
        return Ok(Json(Vec::new()));
    };
    let history = state
        .chat_messages
        .list_for_document(id, LIST_LIMIT)
        .await?;
    Ok(Json(history))
}
