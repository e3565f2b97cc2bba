//! Mock generation backend for deterministic testing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use studygenie_inference::mock::MockGenerationBackend;
//!
//! let backend = MockGenerationBackend::new()
//!     .with_response_for("flashcards", r#"[{"front": "F", "back": "B"}]"#)
//!     .with_fixed_response("Mock answer");
//! assert_eq!(backend.call_count(), 0);
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use studygenie_core::{Error, GenerationBackend, Result};

/// How a failing mock reports its failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// Transient provider failure (`Error::Inference`).
    Provider,
    /// Deployment misconfiguration (`Error::Config`).
    Config,
}

/// Mock generation backend for testing.
#[derive(Clone)]
pub struct MockGenerationBackend {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    model: String,
    default_response: String,
    routes: Vec<(String, String)>,
    failure: Option<MockFailure>,
}

/// A recorded generation call.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub system: String,
    pub prompt: String,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            model: "mock-model".to_string(),
            default_response: "Mock response".to_string(),
            routes: Vec::new(),
            failure: None,
        }
    }
}

impl Default for MockGenerationBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGenerationBackend {
    /// Create a new mock backend with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Reply used when no routed response matches.
    pub fn with_fixed_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Reply with `response` whenever the system instruction or the prompt
    /// contains `needle`. Routes are checked in insertion order.
    pub fn with_response_for(
        mut self,
        needle: impl Into<String>,
        response: impl Into<String>,
    ) -> Self {
        Arc::make_mut(&mut self.config)
            .routes
            .push((needle.into(), response.into()));
        self
    }

    /// Fail every call.
    pub fn failing_with(mut self, failure: MockFailure) -> Self {
        Arc::make_mut(&mut self.config).failure = Some(failure);
        self
    }

    /// Get all logged calls for assertion.
    pub fn get_calls(&self) -> Vec<MockCall> {
        self.log().clone()
    }

    /// Number of generation calls made so far.
    pub fn call_count(&self) -> usize {
        self.log().len()
    }

    fn log(&self) -> MutexGuard<'_, Vec<MockCall>> {
        self.call_log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn respond(&self, system: &str, prompt: &str) -> Result<String> {
        self.log().push(MockCall {
            system: system.to_string(),
            prompt: prompt.to_string(),
        });

        match self.config.failure {
            Some(MockFailure::Provider) => {
                return Err(Error::Inference("Simulated provider failure".to_string()))
            }
            Some(MockFailure::Config) => {
                return Err(Error::Config("No API key configured".to_string()))
            }
            None => {}
        }

        let routed = self
            .config
            .routes
            .iter()
            .find(|(needle, _)| system.contains(needle.as_str()) || prompt.contains(needle.as_str()))
            .map(|(_, response)| response.clone());
        Ok(routed.unwrap_or_else(|| self.config.default_response.clone()))
    }
}

#[async_trait]
impl GenerationBackend for MockGenerationBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.respond("", prompt)
    }

    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        self.respond(system, prompt)
    }

    fn check_ready(&self) -> Result<()> {
        match self.config.failure {
            Some(MockFailure::Config) => Err(Error::Config("No API key configured".to_string())),
            _ => Ok(()),
        }
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
