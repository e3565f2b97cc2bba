//! # studygenie-inference
//!
//! Language model integration for StudyGenie.
//!
//! - [`openai`]: OpenAI-compatible chat completions backend
//! - [`parser`]: turns model replies into validated records
//! - [`prompts`]: prompt templates
//! - [`generator`]: MCQ, flashcard and chat tasks with placeholder fallback

pub mod generator;
pub mod openai;
pub mod parser;
pub mod prompts;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use generator::{
    placeholder_flashcard, placeholder_mcq, FallbackReason, StudyGenerator, CHAT_APOLOGY,
};
pub use openai::{OpenAIBackend, OpenAIConfig};
pub use parser::{extract_json, parse_flashcards, parse_mcqs};

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockFailure, MockGenerationBackend};
