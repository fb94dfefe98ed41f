//! # Atlas Knowledge
//!
//! The retrieval/context-assembly engine: text normalization, the in-memory
//! knowledge index, keyword relevance ranking, and rendering of the context
//! block injected into each grounding prompt.
//!
//! The index and domain documents are built once at process start from
//! embedded reference data and are immutable afterwards — read-only shared
//! state, safe for concurrent reads without locking.

pub mod assembler;
pub mod catalog;
pub mod grounding;
pub mod normalize;
pub mod ranker;

pub use catalog::{Article, Chapter, DomainDocument, KnowledgeIndex};
pub use grounding::{DocumentGrounding, Grounding, GroundingSet, RankedGrounding};
pub use normalize::normalize;
pub use ranker::{RankedChapter, rank};
