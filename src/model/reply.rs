use serde::{Deserialize, Serialize};

/// Sentences used to pad `example_sentences` up to three entries. Padding is
/// positional: a reply arriving with one sentence gets entries 1 and 2
/// appended, a reply with none gets all three.
pub const DEFAULT_EXAMPLE_SENTENCES: [&str; 3] = [
    "Let's continue our conversation.",
    "I'm here to help you practice English.",
    "What would you like to talk about next?",
];

/// Bot reply substituted whenever the model produced an empty one.
pub const FALLBACK_BOT_REPLY: &str = "Let's continue our conversation!";

/// Overall comment used when a reply had to be rebuilt from plain prose.
pub const HEURISTIC_OVERALL_COMMENT: &str = "Let's continue practicing English together!";

/// Structured critique attached to every tutor reply. All four fields are
/// guaranteed present after normalization; empty is a valid value for each.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackBlock {
    #[serde(default)]
    pub grammar_corrections: Vec<String>,
    #[serde(default)]
    pub vocabulary_suggestions: Vec<String>,
    #[serde(default)]
    pub pronunciation_tips: Vec<String>,
    #[serde(default)]
    pub overall_comment: String,
}

/// One fully-formed tutoring exchange: feedback on the learner's message,
/// exactly three example sentences and a non-empty in-character reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorReply {
    pub teaching_feedback: FeedbackBlock,
    pub example_sentences: Vec<String>,
    pub bot_reply: String,
}

impl TutorReply {
    /// Canned reply used when the LLM call itself failed. Built directly,
    /// not through the normalizer, so the transport path stays
    /// distinguishable from malformed-output recovery.
    pub fn error_fallback(error: &str) -> Self {
        Self {
            teaching_feedback: FeedbackBlock {
                overall_comment: format!("Error processing response: {error}"),
                ..FeedbackBlock::default()
            },
            example_sentences: DEFAULT_EXAMPLE_SENTENCES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            bot_reply: "I apologize, but I encountered an error. Let's continue our conversation!"
                .into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_fallback_embeds_error_text() {
        let reply = TutorReply::error_fallback("connection refused");
        assert!(reply
            .teaching_feedback
            .overall_comment
            .contains("connection refused"));
        assert_eq!(reply.example_sentences.len(), 3);
        assert!(!reply.bot_reply.is_empty());
    }
}
