//! Pairwise relation heuristic for the knowledge graph.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::{GraphEdge, GraphNode, KnowledgeGraph};
use crate::types::Concept;

static DEFINITION_DELIMITERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s,;.()]+").unwrap());

/// Links concepts that look related.
///
/// Two concepts are connected when any of these hold:
/// 1. they have the same category;
/// 2. one's term appears in the other's definition (both definitions non-empty);
/// 3. their definitions share at least two distinct words of five or more
///    characters;
/// 4. either lists the other in its related concepts, by term or by id.
///
/// Every unordered pair is examined, so cost grows quadratically with the
/// number of concepts. That is fine for a personal collection of tens to a
/// few hundred concepts; larger sets would need candidate blocking.
#[derive(Debug, Clone)]
pub struct GraphLinker {
    min_word_len: usize,
    min_shared_words: usize,
}

impl Default for GraphLinker {
    fn default() -> Self {
        Self {
            min_word_len: 5,
            min_shared_words: 2,
        }
    }
}

// Per-concept values computed once instead of once per pair.
struct Prepared<'a> {
    concept: &'a Concept,
    label: String,
    definition: &'a str,
    words: HashSet<&'a str>,
}

impl GraphLinker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a different number of shared definition words.
    pub fn with_min_shared_words(mut self, n: usize) -> Self {
        self.min_shared_words = n;
        self
    }

    /// Compute the deduplicated edge set.
    ///
    /// Each unordered pair of distinct ids appears at most once. The source of
    /// an edge is whichever concept comes first in `concepts`.
    pub fn link(&self, concepts: &[Concept]) -> Vec<GraphEdge> {
        let lowered: Vec<String> = concepts.iter().map(|c| c.definition.to_lowercase()).collect();
        let prepared: Vec<Prepared<'_>> = concepts
            .iter()
            .zip(lowered.iter().map(String::as_str))
            .map(|(concept, definition)| Prepared {
                concept,
                label: concept.term.to_lowercase(),
                definition,
                words: self.significant_words(definition),
            })
            .collect();

        let mut seen: HashSet<(&str, &str)> = HashSet::new();
        let mut edges = Vec::new();

        for (i, a) in prepared.iter().enumerate() {
            for b in &prepared[i + 1..] {
                let (id_a, id_b) = (a.concept.id.as_str(), b.concept.id.as_str());
                if id_a == id_b {
                    continue;
                }
                let key = if id_a < id_b { (id_a, id_b) } else { (id_b, id_a) };
                if seen.contains(&key) || !self.related(a, b) {
                    continue;
                }
                seen.insert(key);
                edges.push(GraphEdge {
                    source: id_a.to_string(),
                    target: id_b.to_string(),
                });
            }
        }

        debug!(nodes = concepts.len(), edges = edges.len(), "linked knowledge graph");
        edges
    }

    /// Build nodes and edges for a concept set.
    pub fn build(&self, concepts: &[Concept]) -> KnowledgeGraph {
        KnowledgeGraph {
            nodes: concepts.iter().map(GraphNode::from).collect(),
            edges: self.link(concepts),
        }
    }

    fn related(&self, a: &Prepared<'_>, b: &Prepared<'_>) -> bool {
        a.concept.category == b.concept.category
            || self.mentions_each_other(a, b)
            || self.shares_vocabulary(a, b)
            || lists_as_related(a.concept, b.concept)
            || lists_as_related(b.concept, a.concept)
    }

    fn mentions_each_other(&self, a: &Prepared<'_>, b: &Prepared<'_>) -> bool {
        if a.definition.is_empty() || b.definition.is_empty() {
            return false;
        }
        (!b.label.is_empty() && a.definition.contains(b.label.as_str()))
            || (!a.label.is_empty() && b.definition.contains(a.label.as_str()))
    }

    fn shares_vocabulary(&self, a: &Prepared<'_>, b: &Prepared<'_>) -> bool {
        if self.min_shared_words == 0 {
            return true;
        }
        a.words.intersection(&b.words).take(self.min_shared_words).count() >= self.min_shared_words
    }

    fn significant_words<'a>(&self, definition: &'a str) -> HashSet<&'a str> {
        DEFINITION_DELIMITERS
            .split(definition)
            .filter(|w| w.chars().count() >= self.min_word_len)
            .collect()
    }
}

fn lists_as_related(from: &Concept, to: &Concept) -> bool {
    from.related_concepts
        .iter()
        .any(|r| r.refers_to(&to.id, &to.term))
}

/// Build the knowledge graph with the default heuristic.
pub fn build_knowledge_graph(concepts: &[Concept]) -> KnowledgeGraph {
    GraphLinker::default().build(concepts)
}
