//! # Atlas Session
//!
//! The session orchestrator: a small state machine that tracks the active
//! domain, the conversation transcript, and the in-flight flag, and drives
//! one request/response cycle through the grounding handlers and the
//! external completion service.

pub mod orchestrator;
pub mod prompt;

pub use orchestrator::{
    ChatSession, Orchestrator, RejectReason, SessionState, SubmitOutcome,
};
pub use prompt::{GENERIC_FAILURE_TEXT, REFUSAL_SENTENCE, grounding_instruction};
