//! System prompt for free conversation and assembly of the outbound message
//! list. Scenario prompts live with their data in [`crate::model::scenario`];
//! both share the same output contract text.

use crate::engine::llm_client::ChatMessage;
use crate::model::message::ConversationTurn;
use crate::model::scenario::OUTPUT_CONTRACT;

const TUTOR_PREAMBLE: &str = r#"You are an experienced English conversation tutor. Your role is to help learners improve their English through natural conversation practice."#;

const TUTOR_EXAMPLE: &str = r#"
**Example of a good response:**

User: "I want to learn English better."

Your response (as JSON):
{
    "teaching_feedback": {
        "grammar_corrections": [],
        "vocabulary_suggestions": ["You could also say 'I want to improve my English' which sounds more natural."],
        "pronunciation_tips": [],
        "overall_comment": "Great! Your sentence is clear and grammatically correct. Using 'better' is fine, though 'improve' might sound slightly more natural in formal contexts."
    },
    "example_sentences": [
        "I'm looking forward to improving my English skills through regular practice.",
        "What specific areas of English would you like to focus on?",
        "Let's start with some daily conversation practice to build your confidence."
    ],
    "bot_reply": "That's wonderful! I'm here to help you improve your English. What would you like to practice today? We can work on conversation, grammar, vocabulary, or any specific topic you're interested in."
}"#;

/// Instruction sent on every free-conversation turn.
pub fn tutor_system_prompt() -> String {
    format!("{TUTOR_PREAMBLE}\n{OUTPUT_CONTRACT}\n{TUTOR_EXAMPLE}")
}

/// `[system] + recent history + [current user message]`, in that order.
/// The caller decides the history window (see
/// [`crate::model::conversation::Conversation::recent`]).
pub fn build_messages(
    system_prompt: &str,
    history: &[ConversationTurn],
    user_message: &str,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::new("system", system_prompt));

    for turn in history {
        messages.push(ChatMessage::new(turn.role.as_str(), turn.content.clone()));
    }

    messages.push(ChatMessage::new("user", user_message));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::conversation::{Conversation, RECENT_TURN_WINDOW};

    #[test]
    fn message_order_is_system_history_user() {
        let history = vec![
            ConversationTurn::user("hello"),
            ConversationTurn::assistant("hi there"),
        ];
        let messages = build_messages("be a tutor", &history, "how are you?");

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, "be a tutor");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[2].role, "assistant");
        assert_eq!(messages[3].role, "user");
        assert_eq!(messages[3].content, "how are you?");
    }

    #[test]
    fn outbound_list_carries_only_the_recent_window() {
        let mut conversation = Conversation::new();
        for i in 0..7 {
            conversation.push_user(format!("turn {i}"));
        }

        let messages = build_messages("sys", conversation.recent(), "latest");
        // system + 5 history turns + current user message
        assert_eq!(messages.len(), RECENT_TURN_WINDOW + 2);
        assert_eq!(messages[1].content, "turn 2");
        assert_eq!(messages[5].content, "turn 6");
    }

    #[test]
    fn tutor_prompt_names_all_three_components() {
        let prompt = tutor_system_prompt();
        assert!(prompt.contains("teaching_feedback"));
        assert!(prompt.contains("example_sentences"));
        assert!(prompt.contains("bot_reply"));
    }
}
