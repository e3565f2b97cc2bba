//! Prompt templates for study material generation and document chat.

use studygenie_core::defaults::{CHAT_CONTEXT_CHARS, GENERATION_CONTEXT_CHARS};
use studygenie_core::truncate_chars;

pub const MCQ_SYSTEM: &str = "You are an expert educational content creator. Generate high-quality multiple choice questions based on the provided content.";

pub const FLASHCARD_SYSTEM: &str =
    "You are an expert educational content creator. Generate effective flashcards for studying.";

/// User prompt asking for `count` multiple choice questions about `content`.
pub fn mcq_prompt(content: &str, count: usize) -> String {
    format!(
        "Based on the following content, create {count} multiple choice questions.\n\
         Each question should have 4 options and test understanding of key concepts.\n\
         \n\
         Format your response as a JSON array where each question has:\n\
         - question: the question text\n\
         - options: array of 4 possible answers\n\
         - correct_answer: index (0-3) of the correct option\n\
         - explanation: brief explanation of why the answer is correct\n\
         \n\
         Content:\n\
         {content}\n\
         \n\
         Return ONLY the JSON array, no other text.",
        count = count,
        content = truncate_chars(content, GENERATION_CONTEXT_CHARS),
    )
}

/// User prompt asking for `count` flashcards about `content`.
pub fn flashcard_prompt(content: &str, count: usize) -> String {
    format!(
        "Based on the following content, create {count} flashcards for studying.\n\
         Each flashcard should have a question/term on the front and the answer/definition on the back.\n\
         \n\
         Format your response as a JSON array where each flashcard has:\n\
         - front: the question or term\n\
         - back: the answer or definition\n\
         \n\
         Content:\n\
         {content}\n\
         \n\
         Return ONLY the JSON array, no other text.",
        count = count,
        content = truncate_chars(content, GENERATION_CONTEXT_CHARS),
    )
}

/// System instruction grounding the tutor in the document text.
pub fn chat_system(content: &str) -> String {
    format!(
        "You are an AI tutor. Answer questions based ONLY on the provided document content.\n\
         If the answer isn't in the document, say so politely.\n\
         \n\
         Document content:\n\
         {}",
        truncate_chars(content, CHAT_CONTEXT_CHARS)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mcq_prompt_mentions_count_and_fields() {
        let prompt = mcq_prompt("Cells divide by mitosis.", 10);
        assert!(prompt.contains("create 10 multiple choice questions"));
        assert!(prompt.contains("correct_answer"));
        assert!(prompt.contains("Cells divide by mitosis."));
        assert!(prompt.ends_with("Return ONLY the JSON array, no other text."));
    }

    #[test]
    fn test_generation_prompts_truncate_content() {
        let content = format!("{}{}", "a".repeat(3000), "QQQQ");
        let prompt = flashcard_prompt(&content, 15);
        assert!(prompt.contains("create 15 flashcards"));
        assert!(prompt.contains(&"a".repeat(3000)));
        assert!(!prompt.contains("QQQQ"));
    }

    #[test]
    fn test_chat_system_uses_larger_window() {
        let content = format!("{}{}", "x".repeat(4000), "TAIL");
        let system = chat_system(&content);
        assert!(system.contains(&"x".repeat(4000)));
        assert!(!system.contains("TAIL"));
        assert!(system.starts_with("You are an AI tutor."));
    }
}
