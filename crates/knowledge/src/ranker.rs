//! Keyword relevance ranking.
//!
//! Scores every chapter of the index against a question and returns the
//! top-scoring shortlist. Purely lexical: token-level exact matches weigh
//! double a substring match, and a keyword never counts twice.

use std::collections::HashSet;

use crate::catalog::KnowledgeIndex;
use crate::normalize::normalize;

/// Maximum number of chapters returned by a ranking pass.
pub const MAX_SELECTED: usize = 3;

/// Score for a keyword equal to one of the question's tokens.
const SCORE_TOKEN_MATCH: u32 = 10;
/// Score for a keyword appearing only as a substring of the question.
const SCORE_SUBSTRING_MATCH: u32 = 5;

/// One chapter selected by the ranker, with its accumulated score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedChapter {
    pub id: u32,
    pub title: String,
    pub score: u32,
}

/// Rank the index's chapters against a raw question.
///
/// Returns `None` when no chapter scores above zero — a distinct "no match"
/// outcome, not an empty shortlist. When `Some`, the list is non-empty,
/// sorted by descending score with ties keeping catalog order, and holds at
/// most [`MAX_SELECTED`] entries.
pub fn rank(question: &str, index: &KnowledgeIndex) -> Option<Vec<RankedChapter>> {
    let normalized = normalize(question);
    let tokens: HashSet<&str> = normalized.split_whitespace().collect();

    let mut scored: Vec<RankedChapter> = Vec::new();

    for chapter in index.chapters() {
        let mut counted: HashSet<String> = HashSet::new();
        let mut score = 0u32;

        for keyword in chapter.candidate_keywords() {
            let keyword = normalize(keyword);
            if keyword.is_empty() || !counted.insert(keyword.clone()) {
                continue;
            }
            if tokens.contains(keyword.as_str()) {
                score += SCORE_TOKEN_MATCH;
            } else if !normalized.is_empty() && normalized.contains(&keyword) {
                score += SCORE_SUBSTRING_MATCH;
            }
        }

        if score > 0 {
            scored.push(RankedChapter {
                id: chapter.id,
                title: chapter.title.clone(),
                score,
            });
        }
    }

    if scored.is_empty() {
        return None;
    }

    // sort_by is stable: equal scores keep catalog order
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(MAX_SELECTED);
    Some(scored)
}
