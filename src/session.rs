//! Conversation state for the AI fallback path.
//!
//! One `ConversationContext` per logical conversation. The host keeps a
//! single session; multi-user session management is out of scope.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::llm::Message;

/// Context handle shared across concurrent resolutions. The mutex serializes
/// appends so a turn pair is never lost under concurrent fallback calls.
pub type SharedContext = Arc<Mutex<ConversationContext>>;

/// Append-only dialogue history. Turns are never truncated or reordered for
/// the lifetime of the session.
#[derive(Debug, Clone, Default)]
pub struct ConversationContext {
    turns: Vec<Message>,
}

impl ConversationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context seeded with the starter exchange the assistant ships with.
    pub fn seeded() -> Self {
        Self {
            turns: vec![
                Message::user("hi.."),
                Message::assistant("Hi! How can I help you today?"),
            ],
        }
    }

    pub fn shared(self) -> SharedContext {
        Arc::new(Mutex::new(self))
    }

    /// Snapshot of the history for building an upstream request.
    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Record one completed fallback round trip. This is the only mutation
    /// the context supports.
    pub fn append_exchange(&mut self, user_text: impl Into<String>, model_text: impl Into<String>) {
        self.turns.push(Message::user(user_text));
        self.turns.push(Message::assistant(model_text));
    }
}
