//! Data models for StudyGenie.
//!
//! Every record is created once and never mutated afterwards. Identifiers are
//! UUIDv7 so that natural ordering follows creation time.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::uuid_utils::new_v7;

/// Current time at the microsecond precision the database stores, so a
/// record reads back exactly as it was returned when created.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

// =============================================================================
// DOCUMENTS
// =============================================================================

/// An uploaded PDF and its full extracted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub filename: String,
    /// Full extracted text (trimmed, never empty).
    pub content: String,
    pub upload_time: DateTime<Utc>,
}

impl Document {
    /// Create a new document stamped with a fresh id and the current time.
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: new_v7(),
            filename: filename.into(),
            content: content.into(),
            upload_time: now(),
        }
    }

    /// Listing projection without the document body.
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.id,
            filename: self.filename.clone(),
            upload_time: self.upload_time,
        }
    }
}

/// Lightweight document listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: Uuid,
    pub filename: String,
    pub upload_time: DateTime<Utc>,
}

// =============================================================================
// STUDY MATERIALS
// =============================================================================

/// A generated multiple choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MCQuestion {
    pub id: Uuid,
    pub question: String,
    /// Answer options in display order (four expected).
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct_answer: usize,
    pub explanation: String,
}

impl MCQuestion {
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct_answer: usize,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            id: new_v7(),
            question: question.into(),
            options,
            correct_answer,
            explanation: explanation.into(),
        }
    }
}

/// A generated flashcard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: Uuid,
    pub front: String,
    pub back: String,
}

impl Flashcard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id: new_v7(),
            front: front.into(),
            back: back.into(),
        }
    }
}

/// Generated MCQs and flashcards for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyMaterial {
    pub id: Uuid,
    pub document_id: Uuid,
    pub mcqs: Vec<MCQuestion>,
    pub flashcards: Vec<Flashcard>,
    pub created_at: DateTime<Utc>,
}

impl StudyMaterial {
    pub fn new(document_id: Uuid, mcqs: Vec<MCQuestion>, flashcards: Vec<Flashcard>) -> Self {
        Self {
            id: new_v7(),
            document_id,
            mcqs,
            flashcards,
            created_at: now(),
        }
    }
}

// =============================================================================
// CHAT
// =============================================================================

/// One question/answer turn against a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub document_id: Uuid,
    pub user_message: String,
    pub ai_response: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(
        document_id: Uuid,
        user_message: impl Into<String>,
        ai_response: impl Into<String>,
    ) -> Self {
        Self {
            id: new_v7(),
            document_id,
            user_message: user_message.into(),
            ai_response: ai_response.into(),
            timestamp: now(),
        }
    }
}
