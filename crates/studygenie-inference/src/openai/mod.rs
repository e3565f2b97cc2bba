//! OpenAI-compatible generation backend.
//!
//! Works with any endpoint that speaks the chat completions protocol:
//! the OpenAI cloud API, Azure OpenAI, Ollama, vLLM, LocalAI or LM Studio.
//!
//! # Example
//!
//! ```rust,no_run
//! use studygenie_inference::openai::{OpenAIBackend, OpenAIConfig};
//! use studygenie_core::GenerationBackend;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = OpenAIConfig {
//!         base_url: "http://localhost:11434/v1".to_string(),
//!         api_key: None,
//!         gen_model: "llama3".to_string(),
//!         timeout_seconds: 120,
//!         skip_tls_verify: false,
//!     };
//!     let backend = OpenAIBackend::new(config).unwrap();
//!     let reply = backend.generate("Say hello").await.unwrap();
//!     println!("{}", reply);
//! }
//! ```

mod backend;
mod error;
mod types;

pub use backend::{
    OpenAIBackend, OpenAIConfig, DEFAULT_GEN_MODEL, DEFAULT_OPENAI_URL, DEFAULT_TIMEOUT_SECS,
};
pub use error::OpenAIErrorCode;
pub use types::*;
