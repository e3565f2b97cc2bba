//! Document repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use studygenie_core::{Document, DocumentRepository, DocumentSummary, Error, Result};

/// PostgreSQL implementation of DocumentRepository.
#[derive(Clone)]
pub struct PgDocumentRepository {
    pool: Pool<Postgres>,
}

impl PgDocumentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for PgDocumentRepository {
    async fn insert(&self, doc: &Document) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO document (id, filename, content, upload_time)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(doc.id)
        .bind(&doc.filename)
        .bind(&doc.content)
        .bind(doc.upload_time)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<Document>> {
        let row = sqlx::query(
            r#"
            SELECT id, filename, content, upload_time
            FROM document
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(row.map(|r| Document {
            id: r.get("id"),
            filename: r.get("filename"),
            content: r.get("content"),
            upload_time: r.get("upload_time"),
        }))
    }

    async fn list(&self, limit: i64) -> Result<Vec<DocumentSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT id, filename, upload_time
            FROM document
            ORDER BY upload_time ASC, id ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows
            .into_iter()
            .map(|r| DocumentSummary {
                id: r.get("id"),
                filename: r.get("filename"),
                upload_time: r.get("upload_time"),
            })
            .collect())
    }
}
