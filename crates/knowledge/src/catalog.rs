//! The knowledge catalog: chapters, articles, and the in-memory index.
//!
//! The working-time domain uses a hierarchical catalog — chapters carrying
//! keyword sets, with articles nested inside contributing more keywords —
//! plus a parallel store of full chapter bodies keyed by chapter id. The
//! two non-ranking domains use whole documents instead.
//!
//! Everything here is deserialized once at startup from embedded JSON and
//! immutable afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use atlas_core::KnowledgeError;

const CATALOG_JSON: &str = include_str!("../data/catalog.json");
const CHAPTER_BODIES_JSON: &str = include_str!("../data/chapters.json");
const TRAINING_JSON: &str = include_str!("../data/training.json");
const REMOTE_WORK_TEXT: &str = include_str!("../data/remote_work.txt");

/// An article nested inside a chapter. Articles contribute their keywords
/// to the parent chapter's ranking; they have no body of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// One chapter of the working-time catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    /// Stable identifier, unique across the catalog.
    pub id: u32,
    /// Display title, kept in original form (titles are never normalized).
    pub title: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl Chapter {
    /// Chapter-level keywords plus the keywords of every nested article.
    pub fn candidate_keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords
            .iter()
            .map(String::as_str)
            .chain(
                self.articles
                    .iter()
                    .flat_map(|a| a.keywords.iter().map(String::as_str)),
            )
    }
}

#[derive(Debug, Deserialize)]
struct Catalog {
    chapters: Vec<Chapter>,
}

/// The immutable, in-memory catalog of working-time chapters.
///
/// Insertion order is the canonical display order and the ranking
/// tie-break order.
#[derive(Debug, Clone)]
pub struct KnowledgeIndex {
    chapters: Vec<Chapter>,
    bodies: HashMap<u32, String>,
}

impl KnowledgeIndex {
    /// Build an index from already-parsed parts. Chapter ids must be unique.
    pub fn from_parts(
        chapters: Vec<Chapter>,
        bodies: HashMap<u32, String>,
    ) -> Result<Self, KnowledgeError> {
        let mut seen = std::collections::HashSet::new();
        for chapter in &chapters {
            if !seen.insert(chapter.id) {
                return Err(KnowledgeError::Catalog(format!(
                    "duplicate chapter id {}",
                    chapter.id
                )));
            }
        }
        Ok(Self { chapters, bodies })
    }

    /// Parse an index from catalog + body-store JSON.
    pub fn from_json(catalog: &str, bodies: &str) -> Result<Self, KnowledgeError> {
        let catalog: Catalog = serde_json::from_str(catalog)
            .map_err(|e| KnowledgeError::Catalog(e.to_string()))?;

        let raw: HashMap<String, String> = serde_json::from_str(bodies)
            .map_err(|e| KnowledgeError::Catalog(e.to_string()))?;
        let mut parsed = HashMap::with_capacity(raw.len());
        for (key, text) in raw {
            let id: u32 = key.parse().map_err(|_| {
                KnowledgeError::Catalog(format!("chapter body key {key:?} is not an id"))
            })?;
            parsed.insert(id, text);
        }

        Self::from_parts(catalog.chapters, parsed)
    }

    /// The embedded working-time catalog, parsed once at startup.
    pub fn embedded() -> Result<Self, KnowledgeError> {
        Self::from_json(CATALOG_JSON, CHAPTER_BODIES_JSON)
    }

    /// Chapters in catalog order.
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Full body text for a chapter, if the text store has it.
    pub fn body(&self, id: u32) -> Option<&str> {
        self.bodies.get(&id).map(String::as_str)
    }

    /// Every chapter title, in catalog order.
    pub fn chapter_titles(&self) -> Vec<&str> {
        self.chapters.iter().map(|c| c.title.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }
}

/// A whole-document knowledge source for the non-ranking domains.
///
/// Structured sources are serialized to text once at load time; the
/// assembler injects the text verbatim, whatever the question.
#[derive(Debug, Clone)]
pub struct DomainDocument {
    text: String,
}

impl DomainDocument {
    /// Wrap a flat text document.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Parse a structured JSON document and serialize it (pretty-printed)
    /// for prompt injection.
    pub fn from_json_str(raw: &str) -> Result<Self, KnowledgeError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|e| KnowledgeError::Document(e.to_string()))?;
        let text = serde_json::to_string_pretty(&value)
            .map_err(|e| KnowledgeError::Document(e.to_string()))?;
        Ok(Self { text })
    }

    /// The embedded professional-training document.
    pub fn training() -> Result<Self, KnowledgeError> {
        Self::from_json_str(TRAINING_JSON)
    }

    /// The embedded remote-work charter.
    pub fn remote_work() -> Self {
        Self::from_text(REMOTE_WORK_TEXT)
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
