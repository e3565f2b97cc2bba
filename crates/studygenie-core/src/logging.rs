//! Structured logging field names shared by every StudyGenie crate.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Request failed, requires operator attention |
//! | WARN  | Recoverable issue, placeholder content substituted |
//! | INFO  | Lifecycle events, completed uploads and chats |
//! | DEBUG | Config choices, provider round trips |
//! | TRACE | Per-page extraction detail |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "api", "db", "inference", "extract"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "openai", "generator", "pool", "pdf_text"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "upload", "chat", "generate_mcqs", "extract"
pub const OPERATION: &str = "op";

/// Document UUID being operated on.
pub const DOCUMENT_ID: &str = "document_id";

// ─── Subsystem values ──────────────────────────────────────────────────────

pub const SUBSYSTEM_API: &str = "api";
pub const SUBSYSTEM_DB: &str = "db";
pub const SUBSYSTEM_INFERENCE: &str = "inference";
pub const SUBSYSTEM_EXTRACT: &str = "extract";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Characters sent to the provider.
pub const PROMPT_LEN: &str = "prompt_len";

/// Characters received from the provider.
pub const RESPONSE_LEN: &str = "response_len";

/// Number of records produced or returned.
pub const RESULT_COUNT: &str = "result_count";

/// Number of PDF pages seen.
pub const PAGE_COUNT: &str = "page_count";

/// Model identifier.
pub const MODEL: &str = "model";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_field_names_are_unique_snake_case() {
        let fields = [
            SUBSYSTEM,
            COMPONENT,
            OPERATION,
            DOCUMENT_ID,
            DURATION_MS,
            PROMPT_LEN,
            RESPONSE_LEN,
            RESULT_COUNT,
            PAGE_COUNT,
            MODEL,
        ];
        let unique: HashSet<&str> = fields.iter().copied().collect();
        assert_eq!(unique.len(), fields.len());

        let subsystems = [
            SUBSYSTEM_API,
            SUBSYSTEM_DB,
            SUBSYSTEM_INFERENCE,
            SUBSYSTEM_EXTRACT,
        ];
        let unique: HashSet<&str> = subsystems.iter().copied().collect();
        assert_eq!(unique.len(), subsystems.len());
        for field in fields {
            assert!(field
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }
}
