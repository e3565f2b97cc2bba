//! Error types for StudyGenie.

use thiserror::Error;

/// Result type alias using StudyGenie's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for StudyGenie operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Inference/generation failed
    #[error("Inference error: {0}")]
    Inference(String),

    /// A provider reply could not be turned into records
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Uploaded bytes could not be read as a PDF
    #[error("Error extracting text from PDF: {0}")]
    Extraction(String),

    /// The PDF parsed but contained no text
    #[error("{0}")]
    EmptyDocument(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for errors caused by what the client sent rather than by the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_)
                | Error::Extraction(_)
                | Error::EmptyDocument(_)
                | Error::NotFound(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("Document not found".to_string());
        assert_eq!(err.to_string(), "Not found: Document not found");
    }

    #[test]
    fn test_error_display_inference() {
        let err = Error::Inference("model timeout".to_string());
        assert_eq!(err.to_string(), "Inference error: model timeout");
    }

    #[test]
    fn test_error_display_parse() {
        let err = Error::Parse("no JSON array found".to_string());
        assert_eq!(err.to_string(), "Parse error: no JSON array found");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("No API key configured".to_string());
        assert_eq!(err.to_string(), "Configuration error: No API key configured");
    }

    #[test]
    fn test_error_display_extraction() {
        let err = Error::Extraction("invalid file header".to_string());
        assert_eq!(
            err.to_string(),
            "Error extracting text from PDF: invalid file header"
        );
    }

    #[test]
    fn test_error_display_empty_document_is_verbatim() {
        let err = Error::EmptyDocument("No text found in PDF".to_string());
        assert_eq!(err.to_string(), "No text found in PDF");
    }

    #[test]
    fn test_client_errors() {
        assert!(Error::InvalidInput("x".into()).is_client_error());
        assert!(Error::Extraction("x".into()).is_client_error());
        assert!(Error::EmptyDocument("x".into()).is_client_error());
        assert!(Error::NotFound("x".into()).is_client_error());
        assert!(!Error::Inference("x".into()).is_client_error());
        assert!(!Error::Config("x".into()).is_client_error());
        assert!(!Error::Internal("x".into()).is_client_error());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("access denied"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
