//! Study material retrieval.

use axum::extract::{Path, State};
use axum::Json;

use studygenie_core::{parse_id, StudyMaterial};

use crate::{ApiError, AppState};

/// `GET /api/study-materials/:document_id`
pub async fn get_study_materials(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<Json<StudyMaterial>, ApiError> {
    let not_found = || ApiError::NotFound("Study materials not found".to_string());

    let id = parse_id(&document_id).ok_or_else(not_found)?;
    let material = state
        .study_materials
        .get_for_document(id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(material))
}
