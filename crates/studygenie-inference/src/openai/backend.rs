//! OpenAI-compatible generation backend implementation.

use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use studygenie_core::defaults::{GEN_MODEL, GEN_TIMEOUT_SECS, OPENAI_BASE_URL};
use studygenie_core::logging::SUBSYSTEM_INFERENCE;
use studygenie_core::{Error, GenerationBackend, Result};

use super::error::OpenAIErrorCode;
use super::types::*;

/// Default OpenAI API endpoint.
pub const DEFAULT_OPENAI_URL: &str = OPENAI_BASE_URL;

/// Default generation model.
pub const DEFAULT_GEN_MODEL: &str = GEN_MODEL;

/// Default timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = GEN_TIMEOUT_SECS;

/// Configuration for the OpenAI-compatible backend.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// API key for authentication (optional for local endpoints).
    pub api_key: Option<String>,
    /// Model to use for generation.
    pub gen_model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Skip TLS verification (for self-signed certs in local environments).
    pub skip_tls_verify: bool,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENAI_URL.to_string(),
            api_key: None,
            gen_model: DEFAULT_GEN_MODEL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            skip_tls_verify: false,
        }
    }
}

impl OpenAIConfig {
    /// Read configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from a variable lookup.
    ///
    /// `EMERGENT_LLM_KEY` takes precedence over `OPENAI_API_KEY`. Blank
    /// values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            base_url: non_empty("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string()),
            api_key: non_empty("EMERGENT_LLM_KEY").or_else(|| non_empty("OPENAI_API_KEY")),
            gen_model: non_empty("OPENAI_GEN_MODEL").unwrap_or_else(|| DEFAULT_GEN_MODEL.to_string()),
            timeout_seconds: non_empty("OPENAI_TIMEOUT")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            skip_tls_verify: non_empty("OPENAI_SKIP_TLS_VERIFY")
                .map(|v| v == "1" || v.to_lowercase() == "true")
                .unwrap_or(false),
        }
    }

    /// The hosted OpenAI endpoint rejects anonymous requests; local
    /// compatible servers usually do not.
    pub fn requires_api_key(&self) -> bool {
        self.base_url.trim_end_matches('/') == DEFAULT_OPENAI_URL
    }
}

/// OpenAI-compatible generation backend.
pub struct OpenAIBackend {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIBackend {
    /// Create a new OpenAI backend with the given configuration.
    ///
    /// A missing API key is not an error here; it is reported by each
    /// generation call so the service can start without credentials.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        let mut client_builder =
            Client::builder().timeout(Duration::from_secs(config.timeout_seconds));

        if config.skip_tls_verify {
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder
            .build()
            .map_err(|e| Error::Inference(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = SUBSYSTEM_INFERENCE,
            component = "openai",
            url = %config.base_url,
            model = %config.gen_model,
            has_api_key = config.api_key.is_some(),
            "Initializing OpenAI backend"
        );

        Ok(Self { client, config })
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(OpenAIConfig::default())
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(OpenAIConfig::from_env())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    /// Fail fast when the endpoint requires a credential and none is set.
    pub fn ensure_credentials(&self) -> Result<()> {
        if self.config.api_key.is_none() && self.config.requires_api_key() {
            return Err(Error::Config("No API key configured".to_string()));
        }
        Ok(())
    }

    /// Build a request with authentication if configured.
    fn build_request(&self, endpoint: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), endpoint);
        let mut req = self.client.post(&url);

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        req.header("Content-Type", "application/json")
    }
}

#[async_trait]
impl GenerationBackend for OpenAIBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_with_system("", prompt).await
    }

    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.ensure_credentials()?;

        let start = Instant::now();
        debug!(
            subsystem = SUBSYSTEM_INFERENCE,
            component = "openai",
            op = "generate",
            model = %self.config.gen_model,
            prompt_len = prompt.len(),
            "Sending chat completion"
        );

        let mut messages = Vec::with_capacity(2);
        if !system.is_empty() {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(prompt));

        let request = ChatCompletionRequest {
            model: self.config.gen_model.clone(),
            messages,
            temperature: None,
            max_tokens: None,
        };

        let response = self
            .build_request("/chat/completions")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Inference(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body: OpenAIErrorResponse = response
                .json()
                .await
                .unwrap_or_else(|_| OpenAIErrorResponse::unknown());
            let code = OpenAIErrorCode::from_response(status, body.kind());
            warn!(
                subsystem = SUBSYSTEM_INFERENCE,
                component = "openai",
                op = "generate",
                status = status.as_u16(),
                config_error = code.is_config(),
                "Provider rejected request"
            );
            return Err(code.into_error(status, &body.error.message));
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Inference(format!("Failed to parse response: {}", e)))?;

        let content = result
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::Inference("Provider returned no choices".to_string()))?;

        debug!(
            subsystem = SUBSYSTEM_INFERENCE,
            component = "openai",
            op = "generate",
            response_len = content.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Generation complete"
        );
        Ok(content)
    }

    fn check_ready(&self) -> Result<()> {
        self.ensure_credentials()
    }

    fn model_name(&self) -> &str {
        &self.config.gen_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OpenAIConfig::default();
        assert_eq!(config.base_url, DEFAULT_OPENAI_URL);
        assert_eq!(config.gen_model, DEFAULT_GEN_MODEL);
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECS);
        assert!(!config.skip_tls_verify);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_requires_api_key_only_for_hosted_endpoint() {
        let hosted = OpenAIConfig::default();
        assert!(hosted.requires_api_key());

        let hosted_slash = OpenAIConfig {
            base_url: format!("{}/", DEFAULT_OPENAI_URL),
            ..Default::default()
        };
        assert!(hosted_slash.requires_api_key());

        let local = OpenAIConfig {
            base_url: "http://localhost:11434/v1".to_string(),
            ..Default::default()
        };
        assert!(!local.requires_api_key());
    }

    #[test]
    fn test_from_lookup_key_precedence() {
        let vars = |name: &str| match name {
            "EMERGENT_LLM_KEY" => Some("emergent".to_string()),
            "OPENAI_API_KEY" => Some("openai".to_string()),
            "OPENAI_TIMEOUT" => Some("not-a-number".to_string()),
            _ => None,
        };
        let config = OpenAIConfig::from_lookup(vars);
        assert_eq!(config.api_key.as_deref(), Some("emergent"));
        assert_eq!(config.timeout_seconds, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.base_url, DEFAULT_OPENAI_URL);

        let config = OpenAIConfig::from_lookup(|name| match name {
            "EMERGENT_LLM_KEY" => Some("   ".to_string()),
            "OPENAI_API_KEY" => Some("openai".to_string()),
            "OPENAI_SKIP_TLS_VERIFY" => Some("true".to_string()),
            _ => None,
        });
        assert_eq!(config.api_key.as_deref(), Some("openai"));
        assert!(config.skip_tls_verify);
    }

    #[test]
    fn test_backend_creation() {
        let backend = OpenAIBackend::with_defaults().unwrap();
        assert_eq!(backend.config().base_url, DEFAULT_OPENAI_URL);
        assert_eq!(backend.model_name(), DEFAULT_GEN_MODEL);
    }

    #[tokio::test]
    async fn test_missing_key_on_hosted_endpoint_is_config_error() {
        let backend = OpenAIBackend::with_defaults().unwrap();
        let err = backend
            .generate_with_system("system", "prompt")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn test_check_ready_requires_key_only_for_hosted_endpoint() {
        let hosted = OpenAIBackend::with_defaults().unwrap();
        assert!(matches!(hosted.check_ready(), Err(Error::Config(_))));

        let keyed = OpenAIBackend::new(OpenAIConfig {
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert!(keyed.check_ready().is_ok());

        let local = OpenAIBackend::new(OpenAIConfig {
            base_url: "http://localhost:11434/v1".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert!(local.check_ready().is_ok());
    }

    #[test]
    fn test_model_name_accessor() {
        let config = OpenAIConfig {
            gen_model: "test-gen".to_string(),
            ..Default::default()
        };
        let backend = OpenAIBackend::new(config).unwrap();
        assert_eq!(backend.model_name(), "test-gen");
    }
}
