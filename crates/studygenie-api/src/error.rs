//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use studygenie_core::logging::SUBSYSTEM_API;
use studygenie_core::Error;

/// Errors returned by HTTP handlers, rendered as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        if !err.is_client_error() {
            return ApiError::Internal(err.to_string());
        }
        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::InvalidInput(msg) | Error::EmptyDocument(msg) => ApiError::BadRequest(msg),
            e => ApiError::BadRequest(e.to_string()),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(subsystem = SUBSYSTEM_API, error = %self, "Request failed");
        }

        let body = Json(serde_json::json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let cases = [
            (Error::NotFound("Document not found".into()), StatusCode::NOT_FOUND),
            (Error::InvalidInput("Empty file".into()), StatusCode::BAD_REQUEST),
            (Error::Extraction("bad xref".into()), StatusCode::BAD_REQUEST),
            (Error::EmptyDocument("No text found in PDF".into()), StatusCode::BAD_REQUEST),
            (Error::Config("No API key configured".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (Error::Inference("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (Error::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn test_messages_are_surfaced_verbatim() {
        let err = ApiError::from(Error::NotFound("Document not found".into()));
        assert_eq!(err.to_string(), "Document not found");

        let err = ApiError::from(Error::EmptyDocument("No text found in PDF".into()));
        assert_eq!(err.to_string(), "No text found in PDF");

        let err = ApiError::from(Error::Extraction("bad xref".into()));
        assert_eq!(err.to_string(), "Error extracting text from PDF: bad xref");
    }
}
