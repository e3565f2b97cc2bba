//! Classification of non-success provider replies.
//!
//! A failed chat completion is either a deployment problem (bad credential,
//! unknown model) that must reach the operator, or a transient provider
//! problem that generation absorbs into placeholder content. The split is
//! expressed by the [`Error`] variant produced here: [`Error::Config`] for the
//! former, [`Error::Inference`] for the latter.

use reqwest::StatusCode;

use studygenie_core::Error;

/// What a non-success chat completion reply means for StudyGenie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenAIErrorCode {
    /// Credential missing, invalid or lacking permission.
    AuthenticationError,
    /// Configured model does not exist at this endpoint.
    ModelNotFound,
    RateLimitExceeded,
    /// Document text plus prompt exceeded the model window.
    ContextLengthExceeded,
    ServerError,
    Unknown,
}

impl OpenAIErrorCode {
    /// Classify a reply from its HTTP status and the `code`/`type` field of
    /// the error body.
    pub fn from_response(status: StatusCode, kind: &str) -> Self {
        if kind == "invalid_api_key" {
            return Self::AuthenticationError;
        }
        if kind == "model_not_found" {
            return Self::ModelNotFound;
        }
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Self::AuthenticationError,
            StatusCode::NOT_FOUND => Self::ModelNotFound,
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimitExceeded,
            StatusCode::BAD_REQUEST if kind.contains("context_length") => {
                Self::ContextLengthExceeded
            }
            s if s.is_server_error() => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    /// True when retrying with another document cannot help.
    pub fn is_config(self) -> bool {
        matches!(self, Self::AuthenticationError | Self::ModelNotFound)
    }

    fn label(self) -> &'static str {
        match self {
            Self::AuthenticationError => "Authentication failed",
            Self::ModelNotFound => "Model not found",
            Self::RateLimitExceeded => "Rate limit exceeded",
            Self::ContextLengthExceeded => "Context too long",
            Self::ServerError => "Provider server error",
            Self::Unknown => "Provider request failed",
        }
    }

    /// Build the error surfaced to callers for this reply.
    pub fn into_error(self, status: StatusCode, message: &str) -> Error {
        let text = format!("{} ({}): {}", self.label(), status, message);
        if self.is_config() {
            Error::Config(text)
        } else {
            Error::Inference(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(status: u16, kind: &str) -> OpenAIErrorCode {
        OpenAIErrorCode::from_response(StatusCode::from_u16(status).unwrap(), kind)
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(classify(401, ""), OpenAIErrorCode::AuthenticationError);
        assert_eq!(classify(403, ""), OpenAIErrorCode::AuthenticationError);
        assert_eq!(classify(404, ""), OpenAIErrorCode::ModelNotFound);
        assert_eq!(classify(429, "rate_limit_exceeded"), OpenAIErrorCode::RateLimitExceeded);
        assert_eq!(classify(502, "bad_gateway"), OpenAIErrorCode::ServerError);
        assert_eq!(classify(418, "teapot"), OpenAIErrorCode::Unknown);
    }

    #[test]
    fn test_body_kind_overrides_status() {
        assert_eq!(classify(400, "model_not_found"), OpenAIErrorCode::ModelNotFound);
        assert_eq!(classify(400, "invalid_api_key"), OpenAIErrorCode::AuthenticationError);
        assert_eq!(
            classify(400, "context_length_exceeded"),
            OpenAIErrorCode::ContextLengthExceeded
        );
        assert_eq!(classify(400, "invalid_request_error"), OpenAIErrorCode::Unknown);
    }

    #[test]
    fn test_config_failures_become_config_errors() {
        for code in [
            OpenAIErrorCode::AuthenticationError,
            OpenAIErrorCode::ModelNotFound,
        ] {
            assert!(code.is_config());
            let err = code.into_error(StatusCode::UNAUTHORIZED, "Invalid key");
            assert!(matches!(err, Error::Config(_)), "{:?}", code);
        }
    }

    #[test]
    fn test_transient_failures_become_inference_errors() {
        for code in [
            OpenAIErrorCode::RateLimitExceeded,
            OpenAIErrorCode::ContextLengthExceeded,
            OpenAIErrorCode::ServerError,
            OpenAIErrorCode::Unknown,
        ] {
            assert!(!code.is_config());
            let err = code.into_error(StatusCode::TOO_MANY_REQUESTS, "slow down");
            assert!(matches!(err, Error::Inference(_)), "{:?}", code);
        }
    }

    #[test]
    fn test_error_text_carries_status_and_message() {
        let err = OpenAIErrorCode::RateLimitExceeded
            .into_error(StatusCode::TOO_MANY_REQUESTS, "Too many requests");
        let text = err.to_string();
        assert!(text.contains("Rate limit exceeded"));
        assert!(text.contains("429"));
        assert!(text.contains("Too many requests"));
    }
}
