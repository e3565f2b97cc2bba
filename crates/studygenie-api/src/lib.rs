//! # studygenie-api
//!
//! HTTP API for StudyGenie: PDF upload with generated study material,
//! document chat, and retrieval of stored results.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod middleware;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use studygenie_core::{ChatMessageRepository, DocumentRepository, StudyMaterialRepository};
use studygenie_db::{Database, InMemoryStore};
use studygenie_extract::PdfTextExtractor;
use studygenie_inference::StudyGenerator;

pub use config::{ApiConfig, StoreBackend};
pub use error::ApiError;
use middleware::{cors_layer, MakeRequestUuidV7};

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub documents: Arc<dyn DocumentRepository>,
    pub study_materials: Arc<dyn StudyMaterialRepository>,
    pub chat_messages: Arc<dyn ChatMessageRepository>,
    pub generator: StudyGenerator,
    pub extractor: PdfTextExtractor,
}

impl AppState {
    /// State backed by PostgreSQL repositories.
    pub fn postgres(db: &Database, generator: StudyGenerator) -> Self {
        Self {
            documents: Arc::new(db.documents.clone()),
            study_materials: Arc::new(db.study_materials.clone()),
            chat_messages: Arc::new(db.chat_messages.clone()),
            generator,
            extractor: PdfTextExtractor::new(),
        }
    }

    /// State backed by a process-local store.
    pub fn in_memory(store: InMemoryStore, generator: StudyGenerator) -> Self {
        Self {
            documents: Arc::new(store.clone()),
            study_materials: Arc::new(store.clone()),
            chat_messages: Arc::new(store),
            generator,
            extractor: PdfTextExtractor::new(),
        }
    }
}

/// Build the application router with its middleware stack.
pub fn router(state: AppState, config: &ApiConfig) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api", get(handlers::root))
        .route("/api/", get(handlers::root))
        .route("/api/upload", post(handlers::upload_document))
        .route("/api/chat", post(handlers::chat_with_document))
        .route("/api/documents", get(handlers::list_documents))
        .route(
            "/api/study-materials/:document_id",
            get(handlers::get_study_materials),
        )
        .route(
            "/api/chat-history/:document_id",
            get(handlers::get_chat_history),
        )
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .layer(cors_layer(config))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_bytes))
        .with_state(state)
}
