use serde::Serialize;

use crate::llm::models::{Message, Role};

/// One line of the conversation. Fields are private so an entry cannot be
/// edited once it is in a log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    role: Role,
    content: String,
}

impl Entry {
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl From<&Entry> for Message {
    fn from(entry: &Entry) -> Self {
        Message { role: entry.role, content: entry.content.clone() }
    }
}

/// Append-only record of a session's exchanges, in display order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversationLog {
    entries: Vec<Entry>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends the user's utterance followed by the assistant's answer.
    pub fn append_exchange(&mut self, utterance: impl Into<String>, reply: impl Into<String>) {
        self.entries.push(Entry { role: Role::User, content: utterance.into() });
        self.entries.push(Entry { role: Role::Assistant, content: reply.into() });
    }

    pub fn to_messages(&self) -> Vec<Message> {
        self.entries.iter().map(Message::from).collect()
    }
}
