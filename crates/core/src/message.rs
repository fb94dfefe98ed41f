//! Message and Transcript domain types.
//!
//! These are the value objects that flow through one conversation session:
//! the user asks → the orchestrator grounds the question → the completion
//! service answers → both turns land in the transcript.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The role of a message in a conversation transcript.
///
/// A closed two-variant set: the transcript only ever holds user questions
/// and assistant answers. The system instruction is built per request and
/// never stored, so it has no transcript role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user
    User,
    /// The assistant (completion-service answer, greeting, or failure text)
    Assistant,
}

/// A single message in a conversation transcript.
///
/// Append-only once created; transcripts are only ever bulk-reset on a
/// domain change, never edited message by message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// The ordered message history of one conversation session.
///
/// The first message is always the synthesized assistant greeting for the
/// chosen domain. It is UI framing, not grounded content, so it is excluded
/// from the history replayed to the completion service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Create a transcript seeded with the domain greeting.
    pub fn with_greeting(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::assistant(greeting)],
        }
    }

    /// Append a message.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// All messages in creation order, greeting included.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The messages replayed to the completion service: everything except
    /// the synthesized greeting at index 0.
    pub fn replayable(&self) -> &[Message] {
        if self.messages.is_empty() {
            &[]
        } else {
            &self.messages[1..]
        }
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}
