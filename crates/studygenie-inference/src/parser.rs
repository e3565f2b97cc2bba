//! Turning free-form model replies into typed study records.
//!
//! A reply is first reduced to a JSON value by an ordered chain of
//! extraction strategies; the first one that yields valid JSON wins. The
//! value is then deserialized into the target record shape. Construction is
//! all-or-nothing: one malformed element rejects the whole batch.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use studygenie_core::logging::SUBSYSTEM_INFERENCE;
use studygenie_core::{Error, Flashcard, MCQuestion, Result};

/// A pure extraction strategy: reply text in, JSON value out.
pub type Strategy = fn(&str) -> Result<Value>;

/// Extraction strategies in precedence order.
pub const STRATEGIES: &[(&str, Strategy)] = &[
    ("direct", parse_direct),
    ("fenced", parse_fenced),
    ("bare_array", parse_bare_array),
];

static FENCED_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json)?\s*(\[.*?\])\s*```").expect("valid fenced regex"));

/// Parse the whole reply as JSON.
pub fn parse_direct(reply: &str) -> Result<Value> {
    serde_json::from_str(reply).map_err(|e| Error::Parse(format!("direct: {}", e)))
}

/// Parse the array inside the first fenced code block, optionally tagged `json`.
pub fn parse_fenced(reply: &str) -> Result<Value> {
    let captured = FENCED_ARRAY
        .captures(reply)
        .and_then(|c| c.get(1))
        .ok_or_else(|| Error::Parse("fenced: no fenced JSON array".to_string()))?;
    serde_json::from_str(captured.as_str()).map_err(|e| Error::Parse(format!("fenced: {}", e)))
}

/// Parse the first bracketed substring that forms a complete JSON array.
///
/// Each `[` is tried in order as a start position and the JSON stream is read
/// from there, so nested arrays and trailing prose are handled.
pub fn parse_bare_array(reply: &str) -> Result<Value> {
    let mut last_err = None;
    for (start, _) in reply.match_indices('[') {
        let mut stream = serde_json::Deserializer::from_str(&reply[start..]).into_iter::<Value>();
        match stream.next() {
            Some(Ok(value)) => return Ok(value),
            Some(Err(e)) => last_err = Some(e.to_string()),
            None => {}
        }
    }
    Err(Error::Parse(match last_err {
        Some(e) => format!("bare_array: {}", e),
        None => "bare_array: no JSON array found".to_string(),
    }))
}

/// Run the strategy chain and return the first successful value together
/// with the name of the strategy that produced it.
pub fn extract_json(reply: &str) -> Result<(&'static str, Value)> {
    let mut failures = Vec::with_capacity(STRATEGIES.len());
    for &(name, strategy) in STRATEGIES {
        match strategy(reply) {
            Ok(value) => {
                debug!(
                    subsystem = SUBSYSTEM_INFERENCE,
                    component = "parser",
                    strategy = name,
                    "Extracted JSON from reply"
                );
                return Ok((name, value));
            }
            Err(Error::Parse(msg)) => failures.push(msg),
            Err(e) => failures.push(e.to_string()),
        }
    }
    Err(Error::Parse(format!(
        "Could not parse AI response as JSON ({})",
        failures.join("; ")
    )))
}

#[derive(Debug, Deserialize)]
struct McqDraft {
    question: String,
    options: Vec<String>,
    correct_answer: usize,
    explanation: String,
}

#[derive(Debug, Deserialize)]
struct FlashcardDraft {
    front: String,
    back: String,
}

fn build_batch<D: DeserializeOwned>(value: Value) -> Result<Vec<D>> {
    let drafts: Vec<D> = serde_json::from_value(value)
        .map_err(|e| Error::Parse(format!("invalid record: {}", e)))?;
    if drafts.is_empty() {
        return Err(Error::Parse("reply contained an empty array".to_string()));
    }
    Ok(drafts)
}

/// Parse a reply into multiple choice questions.
pub fn parse_mcqs(reply: &str) -> Result<Vec<MCQuestion>> {
    let (_, value) = extract_json(reply)?;
    build_batch::<McqDraft>(value)?
        .into_iter()
        .enumerate()
        .map(|(i, d)| {
            if d.options.is_empty() {
                return Err(Error::Parse(format!("question {} has no options", i)));
            }
            if d.correct_answer >= d.options.len() {
                return Err(Error::Parse(format!(
                    "question {} has correct_answer {} outside {} options",
                    i,
                    d.correct_answer,
                    d.options.len()
                )));
            }
            Ok(MCQuestion::new(
                d.question,
                d.options,
                d.correct_answer,
                d.explanation,
            ))
        })
        .collect()
}

/// Parse a reply into flashcards.
pub fn parse_flashcards(reply: &str) -> Result<Vec<Flashcard>> {
    let (_, value) = extract_json(reply)?;
    Ok(build_batch::<FlashcardDraft>(value)?
        .into_iter()
        .map(|d| Flashcard::new(d.front, d.back))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MCQ_JSON: &str = r#"[{"question":"Q","options":["A","B","C","D"],"correct_answer":1,"explanation":"E"}]"#;

    #[test]
    fn test_direct_wins_for_plain_json() {
        let (strategy, value) = extract_json(MCQ_JSON).unwrap();
        assert_eq!(strategy, "direct");
        assert!(value.is_array());
    }

    #[test]
    fn test_fenced_block_with_json_tag() {
        let reply = format!("Sure! ```json\n{}\n```", MCQ_JSON);
        let (strategy, _) = extract_json(&reply).unwrap();
        assert_eq!(strategy, "fenced");

        let mcqs = parse_mcqs(&reply).unwrap();
        assert_eq!(mcqs.len(), 1);
        assert_eq!(mcqs[0].correct_answer, 1);
        assert_eq!(mcqs[0].options, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_fenced_block_without_tag() {
        let reply = "Here you go:\n```\n[{\"front\":\"F\",\"back\":\"B\"}]\n```\nGood luck";
        assert!(parse_fenced(reply).is_ok());
        let cards = parse_flashcards(reply).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].front, "F");
    }

    #[test]
    fn test_bare_array_in_prose() {
        let reply = "The cards are [{\"front\": \"Cell\", \"back\": \"Unit of life\"}] as requested.";
        assert!(parse_direct(reply).is_err());
        assert!(parse_fenced(reply).is_err());
        let (strategy, _) = extract_json(reply).unwrap();
        assert_eq!(strategy, "bare_array");
        let cards = parse_flashcards(reply).unwrap();
        assert_eq!(cards[0].back, "Unit of life");
    }

    #[test]
    fn test_bare_array_recovers_nested_mcq_options() {
        let reply = format!("Here are your questions: {} Good luck!", MCQ_JSON);
        let (strategy, _) = extract_json(&reply).unwrap();
        assert_eq!(strategy, "bare_array");
        let mcqs = parse_mcqs(&reply).unwrap();
        assert_eq!(mcqs.len(), 1);
        assert_eq!(mcqs[0].options, vec!["A", "B", "C", "D"]);
        assert_eq!(mcqs[0].correct_answer, 1);
    }

    #[test]
    fn test_bare_array_skips_bracketed_prose() {
        let reply = format!("[Draft] questions follow.\n{}", MCQ_JSON);
        let value = parse_bare_array(&reply).unwrap();
        assert_eq!(value[0]["question"], "Q");

        let reply = "[note] and [more notes";
        assert!(parse_bare_array(reply).is_err());
    }

    #[test]
    fn test_bare_array_spans_newlines() {
        let reply = "Result:\n[\n  {\"front\": \"a\",\n   \"back\": \"b\"}\n]\nend";
        let cards = parse_flashcards(reply).unwrap();
        assert_eq!(cards.len(), 1);
    }

    #[test]
    fn test_no_json_is_parse_failure() {
        let err = extract_json("I cannot help with that.").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().contains("Could not parse AI response as JSON"));
        assert_eq!(err.to_string().matches("Parse error").count(), 1);
    }

    #[test]
    fn test_missing_field_rejects_whole_batch() {
        let reply = r#"[
            {"question":"Q1","options":["A","B","C","D"],"correct_answer":0,"explanation":"E"},
            {"question":"Q2","options":["A","B","C","D"],"correct_answer":0}
        ]"#;
        assert!(matches!(parse_mcqs(reply), Err(Error::Parse(_))));
    }

    #[test]
    fn test_wrong_type_is_not_coerced() {
        let reply = r#"[{"question":"Q","options":["A","B"],"correct_answer":"1","explanation":"E"}]"#;
        assert!(parse_mcqs(reply).is_err());

        let reply = r#"[{"front": 1, "back": "b"}]"#;
        assert!(parse_flashcards(reply).is_err());
    }

    #[test]
    fn test_correct_answer_out_of_range() {
        let reply = r#"[{"question":"Q","options":["A","B","C","D"],"correct_answer":4,"explanation":"E"}]"#;
        let err = parse_mcqs(reply).unwrap_err();
        assert!(err.to_string().contains("outside 4 options"));

        let reply = r#"[{"question":"Q","options":["A"],"correct_answer":-1,"explanation":"E"}]"#;
        assert!(parse_mcqs(reply).is_err());
    }

    #[test]
    fn test_no_options_rejected() {
        let reply = r#"[{"question":"Q","options":[],"correct_answer":0,"explanation":"E"}]"#;
        assert!(parse_mcqs(reply).is_err());
    }

    #[test]
    fn test_empty_array_is_failure() {
        assert!(parse_mcqs("[]").is_err());
        assert!(parse_flashcards("```json\n[]\n```").is_err());
    }

    #[test]
    fn test_non_array_json_fails_construction() {
        let reply = r#"{"questions": []}"#;
        let (strategy, _) = extract_json(reply).unwrap();
        assert_eq!(strategy, "direct");
        assert!(parse_mcqs(reply).is_err());
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let reply = r#"[{"front":"F","back":"B","difficulty":"easy"}]"#;
        let cards = parse_flashcards(reply).unwrap();
        assert_eq!(cards.len(), 1);
    }

    #[test]
    fn test_each_record_gets_fresh_id() {
        let reply = r#"[{"front":"F","back":"B"},{"front":"F","back":"B"}]"#;
        let cards = parse_flashcards(reply).unwrap();
        assert_ne!(cards[0].id, cards[1].id);
    }

    #[test]
    fn test_order_is_preserved() {
        let reply = r#"[{"front":"1","back":"a"},{"front":"2","back":"b"},{"front":"3","back":"c"}]"#;
        let fronts: Vec<String> = parse_flashcards(reply)
            .unwrap()
            .into_iter()
            .map(|c| c.front)
            .collect();
        assert_eq!(fronts, vec!["1", "2", "3"]);
    }
}
