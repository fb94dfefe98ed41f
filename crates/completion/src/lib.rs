//! # Atlas Completion
//!
//! Implementations of the [`CompletionClient`] trait: the HTTP client for
//! the external chat-completions service, and a scripted mock for tests.
//!
//! [`CompletionClient`]: atlas_core::CompletionClient

pub mod http;
pub mod mock;

pub use http::HttpCompletionClient;
pub use mock::SequentialMockClient;
