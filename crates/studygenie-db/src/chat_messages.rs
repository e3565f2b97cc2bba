//! Chat history repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use studygenie_core::{ChatMessage, ChatMessageRepository, Error, Result};

/// PostgreSQL implementation of ChatMessageRepository.
#[derive(Clone)]
pub struct PgChatMessageRepository {
    pool: Pool<Postgres>,
}

impl PgChatMessageRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChatMessageRepository for PgChatMessageRepository {
    async fn insert(&self, msg: &ChatMessage) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO chat_message (id, document_id, user_message, ai_response, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(msg.id)
        .bind(msg.document_id)
        .bind(&msg.user_message)
        .bind(&msg.ai_response)
        .bind(msg.timestamp)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }

    async fn list_for_document(&self, document_id: Uuid, limit: i64) -> Result<Vec<ChatMessage>> {
        let rows = sqlx::query(
            r#"
            SELECT id, document_id, user_message, ai_response, created_at
            FROM chat_message
            WHERE document_id = $1
            ORDER BY created_at ASC, id ASC
            LIMIT $2
            "#,
        )
        .bind(document_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|r| ChatMessage {
                id: r.get("id"),
                document_id: r.get("document_id"),
                user_message: r.get("user_message"),
                ai_response: r.get("ai_response"),
                timestamp: r.get("created_at"),
            })
            .collect())
    }
}
