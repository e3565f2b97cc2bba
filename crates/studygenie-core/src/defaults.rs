//! Centralized default constants for StudyGenie.
//!
//! Crates reference these instead of defining their own magic numbers.

// =============================================================================
// GENERATION
// =============================================================================

/// Number of multiple choice questions requested per document.
pub const MCQ_COUNT: usize = 10;

/// Number of flashcards requested per document.
pub const FLASHCARD_COUNT: usize = 15;

/// Leading characters of a document included in generation prompts.
pub const GENERATION_CONTEXT_CHARS: usize = 3000;

/// Leading characters of a document included in chat prompts.
pub const CHAT_CONTEXT_CHARS: usize = 4000;

/// Default generation model.
pub const GEN_MODEL: &str = "gpt-4o-mini";

/// Default OpenAI-compatible endpoint.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Provider request timeout in seconds.
pub const GEN_TIMEOUT_SECS: u64 = 300;

// =============================================================================
// API
// =============================================================================

/// Characters of extracted text echoed back in the upload response.
pub const PREVIEW_CHARS: usize = 200;

/// Maximum records returned by list endpoints.
pub const LIST_LIMIT: i64 = 1000;

/// Default upload body limit (50 MiB).
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Default bind address.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default listen port.
pub const SERVER_PORT: u16 = 8001;

// =============================================================================
// DATABASE
// =============================================================================

/// Default maximum pool connections.
pub const DB_MAX_CONNECTIONS: u32 = 10;

/// Seconds to wait for a pooled connection.
pub const DB_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Take at most `max` characters from the front of `text`.
///
/// Counts Unicode scalar values, never splitting a multi-byte character.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
