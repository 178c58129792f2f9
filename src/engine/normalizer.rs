//! Recovery of a well-formed [`TutorReply`] from whatever text the model
//! returned. `normalize` is total: it never fails and never panics, at worst
//! it hands back an all-default reply.

use serde_json::{Map, Value};

use crate::model::reply::{
    FeedbackBlock, TutorReply, DEFAULT_EXAMPLE_SENTENCES, FALLBACK_BOT_REPLY,
    HEURISTIC_OVERALL_COMMENT,
};

/// Longest bot reply salvaged from unstructured text, in characters.
const HEURISTIC_BOT_REPLY_LIMIT: usize = 500;

/// Which recovery path produced the reply. Lets callers and tests assert on
/// the path instead of inferring it from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    /// A JSON object was extracted and parsed, then repaired.
    Structured,
    /// No parsable object; the reply was rebuilt from the prose itself.
    Heuristic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedReply {
    pub reply: TutorReply,
    pub source: ReplySource,
}

/// Turn raw model output into a guaranteed well-formed reply.
pub fn normalize(raw: &str) -> NormalizedReply {
    match parse_structured(raw) {
        Some(value) => NormalizedReply {
            reply: repair(value),
            source: ReplySource::Structured,
        },
        None => NormalizedReply {
            reply: repair(heuristic_value(raw)),
            source: ReplySource::Heuristic,
        },
    }
}

/// Ordered extraction attempts: a ```json fence wins over a bare fence,
/// which wins over a leading-brace span. The result must parse to a JSON
/// object; anything else falls through to the heuristic path.
fn parse_structured(raw: &str) -> Option<Value> {
    let candidate = extract_fenced(raw, true)
        .or_else(|| extract_fenced(raw, false))
        .or_else(|| extract_brace_span(raw))?;

    serde_json::from_str::<Value>(&candidate)
        .ok()
        .filter(|v| v.is_object())
}

/// Inner text of the first complete fenced block, tagged `json` or not.
fn extract_fenced(raw: &str, json_tagged: bool) -> Option<String> {
    let open = if json_tagged { "```json" } else { "```" };
    let start = raw.find(open)? + open.len();
    let rest = &raw[start..];
    let end = rest.find("```")?;
    Some(rest[..end].trim().to_string())
}

/// Greedy span from the first `{` to the last `}`, only attempted when the
/// trimmed text begins with a brace.
fn extract_brace_span(raw: &str) -> Option<String> {
    if !raw.trim_start().starts_with('{') {
        return None;
    }
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| raw[start..=end].to_string())
}

/// Last-resort candidate built from the prose: sentence-like spans become
/// example sentences, a truncated slice of the text becomes the bot reply.
fn heuristic_value(raw: &str) -> Value {
    let spans = sentence_spans(raw);
    let sentences: Vec<Value> = if spans.len() >= 3 {
        spans.into_iter().take(3).map(Value::String).collect()
    } else {
        DEFAULT_EXAMPLE_SENTENCES
            .iter()
            .map(|s| Value::String(s.to_string()))
            .collect()
    };

    let bot_reply = if raw.is_empty() {
        FALLBACK_BOT_REPLY.to_string()
    } else {
        raw.chars().take(HEURISTIC_BOT_REPLY_LIMIT).collect()
    };

    serde_json::json!({
        "teaching_feedback": {
            "grammar_corrections": [],
            "vocabulary_suggestions": [],
            "pronunciation_tips": [],
            "overall_comment": HEURISTIC_OVERALL_COMMENT,
        },
        "example_sentences": sentences,
        "bot_reply": bot_reply,
    })
}

/// Spans starting at an ASCII capital and running to the first `.`, `!` or
/// `?`. Non-overlapping, scanning left to right.
fn sentence_spans(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i].is_ascii_uppercase() {
            let mut j = i;
            while j < chars.len() && !matches!(chars[j], '.' | '!' | '?') {
                j += 1;
            }
            if j == chars.len() {
                break;
            }
            spans.push(chars[i..=j].iter().collect());
            i = j + 1;
        } else {
            i += 1;
        }
    }

    spans
}

/// Enforce every invariant on a candidate object, whatever its shape.
/// Idempotent: repairing an already-repaired reply changes nothing.
pub fn repair(value: Value) -> TutorReply {
    let mut obj = match value {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    let teaching_feedback = repair_feedback(obj.remove("teaching_feedback"));
    let example_sentences = repair_sentences(obj.remove("example_sentences"));

    let mut bot_reply = obj
        .remove("bot_reply")
        .map(stringify)
        .unwrap_or_default();
    if bot_reply.is_empty() {
        bot_reply = FALLBACK_BOT_REPLY.to_string();
    }

    TutorReply {
        teaching_feedback,
        example_sentences,
        bot_reply,
    }
}

fn repair_feedback(value: Option<Value>) -> FeedbackBlock {
    match value {
        Some(Value::Object(mut map)) => FeedbackBlock {
            grammar_corrections: string_list(map.remove("grammar_corrections")),
            vocabulary_suggestions: string_list(map.remove("vocabulary_suggestions")),
            pronunciation_tips: string_list(map.remove("pronunciation_tips")),
            overall_comment: map.remove("overall_comment").map(stringify).unwrap_or_default(),
        },
        // A non-object value is preserved as text rather than discarded.
        Some(other) => FeedbackBlock {
            overall_comment: stringify(other),
            ..FeedbackBlock::default()
        },
        None => FeedbackBlock::default(),
    }
}

fn repair_sentences(value: Option<Value>) -> Vec<String> {
    let mut sentences = string_list(value);
    sentences.truncate(3);
    // Positional padding: the default chosen for each slot depends only on
    // the slot index, so a one-sentence reply gets defaults 2 and 3.
    while sentences.len() < 3 {
        sentences.push(DEFAULT_EXAMPLE_SENTENCES[sentences.len()].to_string());
    }
    sentences
}

fn string_list(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.into_iter().map(stringify).collect(),
        _ => Vec::new(),
    }
}

/// Strings pass through, null becomes empty, anything else keeps its JSON
/// rendering.
fn stringify(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn well_formed_json() -> String {
        serde_json::json!({
            "teaching_feedback": {
                "grammar_corrections": ["Use 'an' before vowels."],
                "vocabulary_suggestions": ["Try 'improve' instead of 'better'."],
                "pronunciation_tips": [],
                "overall_comment": "Nice work!",
            },
            "example_sentences": [
                "I would like to practice.",
                "Could you repeat that?",
                "Thanks for your help.",
            ],
            "bot_reply": "Of course, let's practice together.",
        })
        .to_string()
    }

    #[test]
    fn well_formed_blob_round_trips() {
        let normalized = normalize(&well_formed_json());
        assert_eq!(normalized.source, ReplySource::Structured);

        let reply = normalized.reply;
        assert_eq!(reply.bot_reply, "Of course, let's practice together.");
        assert_eq!(reply.example_sentences.len(), 3);
        assert_eq!(reply.example_sentences[0], "I would like to practice.");
        assert_eq!(reply.teaching_feedback.overall_comment, "Nice work!");
    }

    #[test]
    fn fenced_json_block_is_extracted() {
        let raw = format!("Here is my reply:\n```json\n{}\n```\nHope it helps!", well_formed_json());
        let normalized = normalize(&raw);
        assert_eq!(normalized.source, ReplySource::Structured);
        assert_eq!(normalized.reply.teaching_feedback.overall_comment, "Nice work!");
    }

    #[test]
    fn untagged_fence_is_extracted() {
        let raw = format!("```\n{}\n```", well_formed_json());
        let normalized = normalize(&raw);
        assert_eq!(normalized.source, ReplySource::Structured);
    }

    #[test]
    fn fenced_block_wins_over_bare_brace_span() {
        let raw = format!(
            "{{\"bot_reply\": \"decoy\"}} and then ```json\n{}\n```",
            well_formed_json()
        );
        let normalized = normalize(&raw);
        assert_eq!(normalized.source, ReplySource::Structured);
        assert_eq!(normalized.reply.bot_reply, "Of course, let's practice together.");
    }

    #[test]
    fn leading_brace_span_is_parsed() {
        let raw = format!("  {} trailing chatter", well_formed_json());
        let normalized = normalize(&raw);
        // json ends in '}' and the chatter has no brace, so the greedy span
        // is exactly the object.
        assert_eq!(normalized.source, ReplySource::Structured);
    }

    #[test]
    fn non_object_json_falls_through_to_heuristic() {
        let normalized = normalize("```json\n[1, 2, 3]\n```");
        assert_eq!(normalized.source, ReplySource::Heuristic);
        assert_eq!(normalized.reply.example_sentences.len(), 3);
    }

    #[test]
    fn heuristic_takes_first_three_sentences() {
        let raw = "Great job today. Keep practicing every day! Would you like another topic? Here is more.";
        let normalized = normalize(raw);
        assert_eq!(normalized.source, ReplySource::Heuristic);
        assert_eq!(
            normalized.reply.example_sentences,
            vec![
                "Great job today.",
                "Keep practicing every day!",
                "Would you like another topic?",
            ]
        );
        assert_eq!(normalized.reply.bot_reply, raw);
        assert_eq!(
            normalized.reply.teaching_feedback.overall_comment,
            HEURISTIC_OVERALL_COMMENT
        );
    }

    #[test]
    fn heuristic_with_few_sentences_uses_the_fixed_defaults() {
        let normalized = normalize("just lowercase mumbling with no real sentences");
        assert_eq!(normalized.source, ReplySource::Heuristic);
        assert_eq!(
            normalized.reply.example_sentences,
            DEFAULT_EXAMPLE_SENTENCES
        );
    }

    #[test]
    fn heuristic_bot_reply_is_truncated_to_500_chars() {
        let raw = "x".repeat(800);
        let normalized = normalize(&raw);
        assert_eq!(normalized.reply.bot_reply.chars().count(), 500);
    }

    #[test]
    fn empty_input_yields_the_full_fallback() {
        let normalized = normalize("");
        assert_eq!(normalized.source, ReplySource::Heuristic);
        assert_eq!(normalized.reply.bot_reply, FALLBACK_BOT_REPLY);
        assert_eq!(
            normalized.reply.example_sentences,
            DEFAULT_EXAMPLE_SENTENCES
        );
    }

    #[test]
    fn padding_is_positional() {
        let reply = repair(serde_json::json!({
            "example_sentences": ["Hi."],
            "bot_reply": "ok",
        }));
        assert_eq!(
            reply.example_sentences,
            vec![
                "Hi.",
                "I'm here to help you practice English.",
                "What would you like to talk about next?",
            ]
        );

        let reply = repair(serde_json::json!({
            "example_sentences": ["One.", "Two."],
            "bot_reply": "ok",
        }));
        assert_eq!(reply.example_sentences[2], "What would you like to talk about next?");
    }

    #[test]
    fn extra_sentences_are_truncated_to_the_first_three() {
        let reply = repair(serde_json::json!({
            "example_sentences": ["a", "b", "c", "d", "e"],
            "bot_reply": "ok",
        }));
        assert_eq!(reply.example_sentences, vec!["a", "b", "c"]);
    }

    #[test]
    fn missing_keys_are_filled_in() {
        let reply = repair(serde_json::json!({}));
        assert_eq!(reply.teaching_feedback, FeedbackBlock::default());
        assert_eq!(reply.example_sentences.len(), 3);
        assert_eq!(reply.bot_reply, FALLBACK_BOT_REPLY);
    }

    #[test]
    fn non_object_feedback_is_stringified_into_the_comment() {
        let reply = repair(serde_json::json!({
            "teaching_feedback": "keep going",
            "bot_reply": "ok",
        }));
        assert_eq!(reply.teaching_feedback.overall_comment, "keep going");
        assert!(reply.teaching_feedback.grammar_corrections.is_empty());

        let reply = repair(serde_json::json!({ "teaching_feedback": null }));
        assert_eq!(reply.teaching_feedback.overall_comment, "");
    }

    #[test]
    fn wrong_typed_sentences_become_an_empty_list_then_defaults() {
        let reply = repair(serde_json::json!({
            "example_sentences": "not a list",
        }));
        assert_eq!(reply.example_sentences, DEFAULT_EXAMPLE_SENTENCES);
    }

    #[test]
    fn repair_is_idempotent() {
        let candidates = vec![
            serde_json::json!({}),
            serde_json::json!({"example_sentences": ["Hi."], "bot_reply": ""}),
            serde_json::json!({"teaching_feedback": 42, "bot_reply": "x"}),
            serde_json::json!([1, 2]),
            serde_json::from_str::<Value>(&well_formed_json()).unwrap(),
        ];

        for candidate in candidates {
            let once = repair(candidate);
            let twice = repair(serde_json::to_value(&once).unwrap());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn normalize_never_panics_on_hostile_input() {
        let inputs = [
            "```json",
            "``````",
            "{",
            "}",
            "{}",
            "```json\n{broken\n```",
            "\u{1F600} unicode only",
            "   ",
        ];
        for input in inputs {
            let normalized = normalize(input);
            assert_eq!(normalized.reply.example_sentences.len(), 3);
            assert!(!normalized.reply.bot_reply.is_empty());
        }
    }
}
