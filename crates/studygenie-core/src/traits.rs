//! Core traits for StudyGenie abstractions.
//!
//! These traits define the seams between the HTTP layer, the storage layer and
//! the language model provider, so each side can be swapped for tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// STORAGE TRAITS
// =============================================================================

/// Repository for uploaded documents.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Persist a new document.
    async fn insert(&self, doc: &Document) -> Result<()>;

    /// Fetch a document with its full text, `None` when the id is unknown.
    async fn fetch(&self, id: Uuid) -> Result<Option<Document>>;

    /// List documents oldest first without their text.
    async fn list(&self, limit: i64) -> Result<Vec<DocumentSummary>>;
}

/// Repository for generated study materials.
#[async_trait]
pub trait StudyMaterialRepository: Send + Sync {
    /// Persist a study material record.
    async fn insert(&self, material: &StudyMaterial) -> Result<()>;

    /// The earliest study material stored for a document.
    async fn get_for_document(&self, document_id: Uuid) -> Result<Option<StudyMaterial>>;
}

/// Repository for chat history.
#[async_trait]
pub trait ChatMessageRepository: Send + Sync {
    /// Append one chat turn.
    async fn insert(&self, msg: &ChatMessage) -> Result<()>;

    /// Chat turns for a document, oldest first.
    async fn list_for_document(&self, document_id: Uuid, limit: i64) -> Result<Vec<ChatMessage>>;
}

// =============================================================================
// INFERENCE TRAITS
// =============================================================================

/// Backend for text generation.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Generate text given a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate text with system context.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Report configuration problems that would make every call fail,
    /// without contacting the provider.
    fn check_ready(&self) -> Result<()> {
        Ok(())
    }

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}
