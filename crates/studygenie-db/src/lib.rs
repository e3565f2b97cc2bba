//! # studygenie-db
//!
//! Persistence for StudyGenie.
//!
//! This crate provides:
//! - Connection pool management
//! - PostgreSQL repositories for documents, study materials and chat history
//! - An in-memory store implementing the same traits
//!
//! ## Example
//!
//! ```rust,ignore
//! use studygenie_db::{Database, DocumentRepository};
//! use studygenie_core::Document;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/studygenie").await?;
//!     db.migrate().await?;
//!
//!     let doc = Document::new("notes.pdf", "Photosynthesis converts light.");
//!     db.documents.insert(&doc).await?;
//!     Ok(())
//! }
//! ```

mod chat_messages;
mod documents;
pub mod memory;
pub mod pool;
mod study_materials;

use tracing::info;

use studygenie_core::logging::SUBSYSTEM_DB;

pub use chat_messages::PgChatMessageRepository;
pub use documents::PgDocumentRepository;
pub use memory::InMemoryStore;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use study_materials::PgStudyMaterialRepository;

// Re-export core types
pub use studygenie_core::{
    ChatMessageRepository, DocumentRepository, Error, Result, StudyMaterialRepository,
};

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    pub documents: PgDocumentRepository,
    pub study_materials: PgStudyMaterialRepository,
    pub chat_messages: PgChatMessageRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            documents: PgDocumentRepository::new(pool.clone()),
            study_materials: PgStudyMaterialRepository::new(pool.clone()),
            chat_messages: PgChatMessageRepository::new(pool.clone()),
            pool,
        }
    }

    /// Connect with default pool settings.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        info!(subsystem = SUBSYSTEM_DB, op = "migrate", "Migrations applied");
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
        info!(subsystem = SUBSYSTEM_DB, component = "pool", op = "close", "Database pool closed");
    }
}
