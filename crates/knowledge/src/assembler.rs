//! Context assembly — turns a ranked shortlist (or a whole document) into
//! the single text block injected into the grounding prompt.
//!
//! The output is never empty: when nothing matches, a fixed overview of the
//! catalog is returned instead, so the completion service always has enough
//! surface to answer within the catalog's remit or decline.

use tracing::warn;

use crate::catalog::KnowledgeIndex;
use crate::ranker::{self, RankedChapter};

/// Separator between rendered chapter blocks, so the completion service can
/// visually segment sources.
const BLOCK_DELIMITER: &str = "\n\n---\n\n";

/// Prefix of the fallback returned when no chapter scores above zero.
const NO_MATCH_PREFIX: &str =
    "Aucun chapitre spécifique trouvé pour cette question. Voici un aperçu général des thèmes: ";

/// Returned when every ranked chapter had to be skipped for a missing body.
const EMPTY_SELECTION_FALLBACK: &str =
    "Aucun contenu textuel trouvé pour les chapitres pertinents.";

/// Build the context block for a question against the ranked index.
///
/// Ranks the question, renders the selected chapters, and falls back to the
/// catalog overview when nothing matches.
pub fn context_for_question(question: &str, index: &KnowledgeIndex) -> String {
    match ranker::rank(question, index) {
        Some(ranked) => render_chapters(&ranked, index),
        None => no_match_overview(index),
    }
}

/// Render the selected chapters as labeled source blocks.
///
/// A chapter whose body is missing from the text store is skipped and logged
/// as a data-integrity warning — never fatal. If that empties the selection,
/// the fixed "no textual content" message is returned.
pub fn render_chapters(ranked: &[RankedChapter], index: &KnowledgeIndex) -> String {
    let blocks: Vec<String> = ranked
        .iter()
        .filter_map(|selected| match index.body(selected.id) {
            Some(body) => Some(format!("Source: {}\nContenu: {}", selected.title, body)),
            None => {
                warn!(
                    chapter_id = selected.id,
                    title = %selected.title,
                    "Ranked chapter has no body in the text store, skipping"
                );
                None
            }
        })
        .collect();

    if blocks.is_empty() {
        EMPTY_SELECTION_FALLBACK.to_string()
    } else {
        blocks.join(BLOCK_DELIMITER)
    }
}

/// The fixed no-match fallback: states that no chapter matched and
/// enumerates every chapter title in the index.
pub fn no_match_overview(index: &KnowledgeIndex) -> String {
    format!("{}{}", NO_MATCH_PREFIX, index.chapter_titles().join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Chapter;
    use std::collections::HashMap;

    fn chapter(id: u32, title: &str, keywords: &[&str]) -> Chapter {
        Chapter {
            id,
            title: title.into(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            articles: vec![],
        }
    }

    fn index_with_bodies() -> KnowledgeIndex {
        let bodies: HashMap<u32, String> = [
            (1, "Texte du chapitre congés.".to_string()),
            (2, "Texte du chapitre ARTT.".to_string()),
        ]
        .into();
        KnowledgeIndex::from_parts(
            vec![
                chapter(1, "Congés annuels", &["congés"]),
                chapter(2, "ARTT", &["artt"]),
            ],
            bodies,
        )
        .unwrap()
    }

    #[test]
    fn renders_title_and_body_blocks() {
        let index = index_with_bodies();
        let context = context_for_question("congés et artt", &index);
        assert!(context.contains("Source: Congés annuels"));
        assert!(context.contains("Contenu: Texte du chapitre congés."));
        assert!(context.contains("Source: ARTT"));
        assert!(context.contains("\n\n---\n\n"));
    }

    #[test]
    fn missing_body_is_skipped_not_fatal() {
        let bodies: HashMap<u32, String> =
            [(1, "Texte du chapitre congés.".to_string())].into();
        let index = KnowledgeIndex::from_parts(
            vec![
                chapter(1, "Congés annuels", &["congés"]),
                chapter(2, "ARTT", &["artt"]),
            ],
            bodies,
        )
        .unwrap();

        let context = context_for_question("congés et artt", &index);
        assert!(context.contains("Source: Congés annuels"));
        assert!(!context.contains("Source: ARTT"));
    }

    #[test]
    fn all_bodies_missing_falls_back() {
        let index = KnowledgeIndex::from_parts(
            vec![chapter(1, "Congés annuels", &["congés"])],
            HashMap::new(),
        )
        .unwrap();

        let context = context_for_question("mes congés", &index);
        assert_eq!(context, EMPTY_SELECTION_FALLBACK);
    }

    #[test]
    fn no_match_lists_every_chapter_title() {
        let index = index_with_bodies();
        let context = context_for_question("la météo de demain", &index);
        assert!(context.starts_with("Aucun chapitre spécifique trouvé"));
        assert!(context.contains("Congés annuels"));
        assert!(context.contains("ARTT"));
    }

    #[test]
    fn output_is_never_empty() {
        let index = index_with_bodies();
        for question in ["", "   ", "congés", "xyzzy"] {
            assert!(!context_for_question(question, &index).is_empty());
        }
    }

    #[test]
    fn embedded_index_end_to_end() {
        let index = KnowledgeIndex::embedded().unwrap();
        let context = context_for_question("Combien de jours ARTT ai-je ?", &index);
        assert!(context.contains("Source: ARTT et réduction du temps de travail"));
        assert!(context.contains("20 jours ARTT"));
    }
}
