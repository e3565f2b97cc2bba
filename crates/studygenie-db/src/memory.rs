//! In-process store for tests and database-free local runs.
//!
//! Records are append-only, so insertion order is creation order and list
//! queries return oldest first without sorting.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use studygenie_core::{
    ChatMessage, ChatMessageRepository, Document, DocumentRepository, DocumentSummary, Result,
    StudyMaterial, StudyMaterialRepository,
};

#[derive(Debug, Default)]
struct MemoryState {
    documents: Vec<Document>,
    study_materials: Vec<StudyMaterial>,
    chat_messages: Vec<ChatMessage>,
}

/// Shared in-memory implementation of every repository trait.
///
/// Clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no record of any kind has been stored.
    pub async fn is_empty(&self) -> bool {
        let state = self.state.read().await;
        state.documents.is_empty()
            && state.study_materials.is_empty()
            && state.chat_messages.is_empty()
    }
}

fn clamp_limit(limit: i64) -> usize {
    usize::try_from(limit).unwrap_or(0)
}

#[async_trait]
impl DocumentRepository for InMemoryStore {
    async fn insert(&self, doc: &Document) -> Result<()> {
        self.state.write().await.documents.push(doc.clone());
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Document>> {
        let state = self.state.read().await;
        Ok(state.documents.iter().find(|d| d.id == id).cloned())
    }

    async fn list(&self, limit: i64) -> Result<Vec<DocumentSummary>> {
        let state = self.state.read().await;
        Ok(state
            .documents
            .iter()
            .take(clamp_limit(limit))
            .map(Document::summary)
            .collect())
    }
}

#[async_trait]
impl StudyMaterialRepository for InMemoryStore {
    async fn insert(&self, material: &StudyMaterial) -> Result<()> {
        self.state
            .write()
            .await
            .study_materials
            .push(material.clone());
        Ok(())
    }

    async fn get_for_document(&self, document_id: Uuid) -> Result<Option<StudyMaterial>> {
        let state = self.state.read().await;
        Ok(state
            .study_materials
            .iter()
            .find(|m| m.document_id == document_id)
            .cloned())
    }
}

#[async_trait]
impl ChatMessageRepository for InMemoryStore {
    async fn insert(&self, msg: &ChatMessage) -> Result<()> {
        self.state.write().await.chat_messages.push(msg.clone());
        Ok(())
    }

    async fn list_for_document(&self, document_id: Uuid, limit: i64) -> Result<Vec<ChatMessage>> {
        let state = self.state.read().await;
        Ok(state
            .chat_messages
            .iter()
            .filter(|m| m.document_id == document_id)
            .take(clamp_limit(limit))
            .cloned()
            .collect())
    }
}
