//! Study material repository implementation.
//!
//! Questions and flashcards are stored as JSONB arrays on a single row.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use studygenie_core::{Error, Flashcard, MCQuestion, Result, StudyMaterial, StudyMaterialRepository};

/// PostgreSQL implementation of StudyMaterialRepository.
#[derive(Clone)]
pub struct PgStudyMaterialRepository {
    pool: Pool<Postgres>,
}

impl PgStudyMaterialRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudyMaterialRepository for PgStudyMaterialRepository {
    async fn insert(&self, material: &StudyMaterial) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO study_material (id, document_id, mcqs, flashcards, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(material.id)
        .bind(material.document_id)
        .bind(Json(&material.mcqs))
        .bind(Json(&material.flashcards))
        .bind(material.created_at)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }

    async fn get_for_document(&self, document_id: Uuid) -> Result<Option<StudyMaterial>> {
        let row = sqlx::query(
            r#"
            SELECT id, document_id, mcqs, flashcards, created_at
            FROM study_material
            WHERE document_id = $1
            ORDER BY created_at ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(document_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        let Some(r) = row else {
            return Ok(None);
        };

        let mcqs: Json<Vec<MCQuestion>> = r.try_get("mcqs").map_err(Error::Database)?;
        let flashcards: Json<Vec<Flashcard>> = r.try_get("flashcards").map_err(Error::Database)?;

        Ok(Some(StudyMaterial {
            id: r.get("id"),
            document_id: r.get("document_id"),
            mcqs: mcqs.0,
            flashcards: flashcards.0,
            created_at: r.get("created_at"),
        }))
    }
}
