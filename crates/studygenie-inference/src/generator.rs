//! Study material generation and document chat.
//!
//! Each task makes exactly one provider call. Generator replies go through
//! the [`parser`](crate::parser); any provider or parse failure is replaced
//! by a single fixed placeholder record. Configuration errors are the one
//! exception and always propagate to the caller.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};
use uuid::Uuid;

use studygenie_core::defaults::{FLASHCARD_COUNT, MCQ_COUNT};
use studygenie_core::logging::SUBSYSTEM_INFERENCE;
use studygenie_core::{Error, Flashcard, GenerationBackend, MCQuestion, Result, StudyMaterial};

use crate::parser::{parse_flashcards, parse_mcqs};
use crate::prompts;

/// Reply substituted when the chat provider call fails.
pub const CHAT_APOLOGY: &str =
    "I'm sorry, I encountered an error while processing your question. Please try again.";

/// Why a placeholder was substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The provider replied but the reply could not be turned into records.
    Unparseable,
    /// The provider call itself failed.
    ProviderFailed,
}

/// The single question used when MCQ generation fails.
pub fn placeholder_mcq(reason: FallbackReason) -> MCQuestion {
    match reason {
        FallbackReason::Unparseable => MCQuestion::new(
            "What is the main topic of this document?",
            ["Topic A", "Topic B", "Topic C", "Topic D"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            0,
            "Based on the document content analysis.",
        ),
        FallbackReason::ProviderFailed => MCQuestion::new(
            "Sample question based on the uploaded content",
            ["Option A", "Option B", "Option C", "Option D"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            0,
            "This is a sample question generated from your document.",
        ),
    }
}

/// The single flashcard used when flashcard generation fails.
pub fn placeholder_flashcard(reason: FallbackReason) -> Flashcard {
    match reason {
        FallbackReason::Unparseable => Flashcard::new(
            "Key concept from the document",
            "Definition or explanation based on the content",
        ),
        FallbackReason::ProviderFailed => {
            Flashcard::new("Main topic", "Summary of the document content")
        }
    }
}

/// Generates study materials and chat answers through a generation backend.
#[derive(Clone)]
pub struct StudyGenerator {
    backend: Arc<dyn GenerationBackend>,
    mcq_count: usize,
    flashcard_count: usize,
}

impl StudyGenerator {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self {
            backend,
            mcq_count: MCQ_COUNT,
            flashcard_count: FLASHCARD_COUNT,
        }
    }

    /// Override the number of requested questions and cards.
    pub fn with_counts(mut self, mcq_count: usize, flashcard_count: usize) -> Self {
        self.mcq_count = mcq_count;
        self.flashcard_count = flashcard_count;
        self
    }

    pub fn model_name(&self) -> &str {
        self.backend.model_name()
    }

    /// Fail with [`Error::Config`] when the backend cannot
    /// serve any request, so callers can refuse work before persisting it.
    pub fn ensure_ready(&self) -> Result<()> {
        self.backend.check_ready()
    }

    /// Generate multiple choice questions for `content`.
    ///
    /// Never returns an empty list. Only configuration errors are returned
    /// as `Err`.
    pub async fn generate_mcqs(&self, content: &str) -> Result<Vec<MCQuestion>> {
        let prompt = prompts::mcq_prompt(content, self.mcq_count);
        self.generate_records("generate_mcqs", prompts::MCQ_SYSTEM, &prompt, parse_mcqs, |r| {
            vec![placeholder_mcq(r)]
        })
        .await
    }

    /// Generate flashcards for `content`.
    ///
    /// Never returns an empty list. Only configuration errors are returned
    /// as `Err`.
    pub async fn generate_flashcards(&self, content: &str) -> Result<Vec<Flashcard>> {
        let prompt = prompts::flashcard_prompt(content, self.flashcard_count);
        self.generate_records(
            "generate_flashcards",
            prompts::FLASHCARD_SYSTEM,
            &prompt,
            parse_flashcards,
            |r| vec![placeholder_flashcard(r)],
        )
        .await
    }

    /// Generate questions and flashcards concurrently and bundle them.
    pub async fn generate_study_material(
        &self,
        document_id: Uuid,
        content: &str,
    ) -> Result<StudyMaterial> {
        let (mcqs, flashcards) =
            tokio::join!(self.generate_mcqs(content), self.generate_flashcards(content));
        Ok(StudyMaterial::new(document_id, mcqs?, flashcards?))
    }

    /// Answer `question` from `content`, returning the reply verbatim.
    pub async fn chat(&self, content: &str, question: &str) -> Result<String> {
        let start = Instant::now();
        let system = prompts::chat_system(content);
        match self.backend.generate_with_system(&system, question).await {
            Ok(reply) => {
                info!(
                    subsystem = SUBSYSTEM_INFERENCE,
                    component = "generator",
                    op = "chat",
                    prompt_len = question.len(),
                    response_len = reply.len(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Chat reply generated"
                );
                Ok(reply)
            }
            Err(e @ Error::Config(_)) => Err(e),
            Err(e) => {
                warn!(
                    subsystem = SUBSYSTEM_INFERENCE,
                    component = "generator",
                    op = "chat",
                    error = %e,
                    "Chat provider failed, returning apology"
                );
                Ok(CHAT_APOLOGY.to_string())
            }
        }
    }

    async fn generate_records<T>(
        &self,
        op: &'static str,
        system: &str,
        prompt: &str,
        parse: fn(&str) -> Result<Vec<T>>,
        fallback: impl Fn(FallbackReason) -> Vec<T>,
    ) -> Result<Vec<T>> {
        let start = Instant::now();
        let reply = match self.backend.generate_with_system(system, prompt).await {
            Ok(reply) => reply,
            Err(e @ Error::Config(_)) => return Err(e),
            Err(e) => {
                warn!(
                    subsystem = SUBSYSTEM_INFERENCE,
                    component = "generator",
                    op,
                    error = %e,
                    "Provider call failed, using placeholder"
                );
                return Ok(fallback(FallbackReason::ProviderFailed));
            }
        };

        match parse(&reply) {
            Ok(records) => {
                info!(
                    subsystem = SUBSYSTEM_INFERENCE,
                    component = "generator",
                    op,
                    prompt_len = prompt.len(),
                    response_len = reply.len(),
                    result_count = records.len(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Generated records"
                );
                Ok(records)
            }
            Err(e) => {
                warn!(
                    subsystem = SUBSYSTEM_INFERENCE,
                    component = "generator",
                    op,
                    response_len = reply.len(),
                    error = %e,
                    "Unparseable reply, using placeholder"
                );
                Ok(fallback(FallbackReason::Unparseable))
            }
        }
    }
}
