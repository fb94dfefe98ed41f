//! # Atlas Core
//!
//! Domain types, traits, and error definitions for the Atlas
//! grounded-assistance engine. This crate has **zero framework
//! dependencies** — it defines the domain model that all other crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! The seams of the system are traits defined here (`CompletionClient`),
//! implemented in their respective crates. This enables:
//! - Swapping the completion backend via configuration
//! - Easy testing with scripted mock clients
//! - Clean dependency graph (all crates depend inward on core)

pub mod completion;
pub mod domain;
pub mod error;
pub mod message;

// Re-export key types at crate root for ergonomics
pub use completion::{CompletionClient, CompletionRequest, PromptMessage, PromptRole};
pub use domain::Domain;
pub use error::{CompletionError, Error, KnowledgeError, Result};
pub use message::{Message, Role, Transcript};
