//! CompletionClient trait — the abstraction over the external text-completion
//! service.
//!
//! A client knows how to send an ordered prompt (system instruction, replayed
//! history, current question) and return the assistant's answer text. The
//! orchestrator calls `complete()` without knowing which backend is in use.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CompletionError;
use crate::message::{Message, Role};

/// Role of a prompt message on the wire.
///
/// Distinct from the transcript [`Role`]: the wire format carries the system
/// instruction, which never appears in a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

/// One entry of the ordered prompt payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::Assistant,
            content: content.into(),
        }
    }
}

impl From<&Message> for PromptMessage {
    fn from(msg: &Message) -> Self {
        match msg.role {
            Role::User => PromptMessage::user(&msg.content),
            Role::Assistant => PromptMessage::assistant(&msg.content),
        }
    }
}

/// A complete request to the completion service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The model to use (e.g. "sonar-pro")
    pub model: String,

    /// The full ordered prompt: system, history…, current user question.
    pub messages: Vec<PromptMessage>,
}

/// The core completion trait.
///
/// Implementations: the HTTP chat-completions client, scripted mocks for
/// tests.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// A human-readable name for this client (e.g. "http", "mock").
    fn name(&self) -> &str;

    /// Send a request and return the assistant's answer text.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<String, CompletionError>;
}
