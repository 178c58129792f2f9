use crate::model::message::ConversationTurn;

/// How many of the most recent turns are sent back to the LLM as context.
/// Older turns stay in the transcript but never leave the process again.
pub const RECENT_TURN_WINDOW: usize = 5;

/// Append-only history for one conversation channel. Reset when the session
/// or scenario changes.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<ConversationTurn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(ConversationTurn::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(ConversationTurn::assistant(content));
    }

    /// The window submitted as LLM context: at most the last
    /// [`RECENT_TURN_WINDOW`] turns.
    pub fn recent(&self) -> &[ConversationTurn] {
        let start = self.turns.len().saturating_sub(RECENT_TURN_WINDOW);
        &self.turns[start..]
    }

    /// The full history, for display and retrieval.
    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn reset(&mut self) {
        self.turns.clear();
    }
}
