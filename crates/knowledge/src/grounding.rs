//! Per-domain grounding handlers.
//!
//! Each domain answers one question: "what context block grounds this
//! question?". The working-time domain ranks and assembles chapters; the
//! two simpler domains inject their whole document. Adding a domain means
//! adding one `Grounding` impl and one registry entry — the ranking and
//! assembly code is never touched.

use std::collections::HashMap;
use std::sync::Arc;

use atlas_core::{Domain, KnowledgeError};

use crate::assembler;
use crate::catalog::{DomainDocument, KnowledgeIndex};

/// A source of grounding context for one domain.
pub trait Grounding: Send + Sync {
    /// Build the context block injected into the grounding prompt.
    fn context_for(&self, question: &str) -> String;
}

/// Grounding backed by the ranked chapter catalog.
pub struct RankedGrounding {
    index: Arc<KnowledgeIndex>,
}

impl RankedGrounding {
    pub fn new(index: Arc<KnowledgeIndex>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &KnowledgeIndex {
        &self.index
    }
}

impl Grounding for RankedGrounding {
    fn context_for(&self, question: &str) -> String {
        assembler::context_for_question(question, &self.index)
    }
}

/// Grounding backed by a whole document — no filtering, whatever the question.
pub struct DocumentGrounding {
    document: DomainDocument,
}

impl DocumentGrounding {
    pub fn new(document: DomainDocument) -> Self {
        Self { document }
    }
}

impl Grounding for DocumentGrounding {
    fn context_for(&self, _question: &str) -> String {
        self.document.text().to_string()
    }
}

/// Registry mapping each domain to its grounding handler.
///
/// Built once at startup; read-only shared state afterwards.
pub struct GroundingSet {
    entries: HashMap<Domain, Box<dyn Grounding>>,
}

impl GroundingSet {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register (or replace) the handler for a domain.
    pub fn register(&mut self, domain: Domain, grounding: Box<dyn Grounding>) {
        self.entries.insert(domain, grounding);
    }

    /// The handler for a domain, if registered.
    pub fn for_domain(&self, domain: Domain) -> Option<&dyn Grounding> {
        self.entries.get(&domain).map(|grounding| &**grounding)
    }

    /// Wire up the three built-in domains from the embedded reference data.
    pub fn embedded() -> Result<Self, KnowledgeError> {
        let index = Arc::new(KnowledgeIndex::embedded()?);

        let mut set = Self::new();
        set.register(
            Domain::WorkingTime,
            Box::new(RankedGrounding::new(index)),
        );
        set.register(
            Domain::Training,
            Box::new(DocumentGrounding::new(DomainDocument::training()?)),
        );
        set.register(
            Domain::RemoteWork,
            Box::new(DocumentGrounding::new(DomainDocument::remote_work())),
        );
        Ok(set)
    }
}

impl Default for GroundingSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_set_covers_every_domain() {
        let set = GroundingSet::embedded().unwrap();
        for domain in Domain::ALL {
            assert!(set.for_domain(domain).is_some(), "{domain} not registered");
        }
    }

    #[test]
    fn working_time_filters_by_question() {
        let set = GroundingSet::embedded().unwrap();
        let grounding = set.for_domain(Domain::WorkingTime).unwrap();

        let artt = grounding.context_for("Combien de jours ARTT ai-je ?");
        assert!(artt.contains("ARTT"));
        // unrelated chapters are not injected
        assert!(!artt.contains("Source: Astreintes et permanences"));
    }

    #[test]
    fn document_domains_ignore_the_question() {
        let set = GroundingSet::embedded().unwrap();
        let grounding = set.for_domain(Domain::RemoteWork).unwrap();

        let a = grounding.context_for("les jours autorisés ?");
        let b = grounding.context_for("tout autre sujet");
        assert_eq!(a, b);
        assert!(a.contains("TÉLÉTRAVAIL"));
    }

    #[test]
    fn training_document_is_injected_wholesale() {
        let set = GroundingSet::embedded().unwrap();
        let grounding = set.for_domain(Domain::Training).unwrap();
        let context = grounding.context_for("le CPF ?");
        assert!(context.contains("Compte personnel de formation"));
        assert!(context.contains("Bilan de compétences"));
    }
}
