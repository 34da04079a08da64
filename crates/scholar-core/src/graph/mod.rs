//! Derived knowledge graph over a concept collection.
//!
//! The graph is never persisted; it is rebuilt from the current concepts on
//! every request.

mod linker;

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

pub use linker::{build_knowledge_graph, GraphLinker};

use crate::types::{Category, Concept};

/// A concept as drawn in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub category: String,
    pub definition: String,
}

impl From<&Concept> for GraphNode {
    fn from(concept: &Concept) -> Self {
        Self {
            id: concept.id.clone(),
            label: concept.term.clone(),
            category: concept.category.to_string(),
            definition: concept.definition.clone(),
        }
    }
}

/// An undirected link between two concept ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
}

impl GraphEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Whether this edge touches `id`.
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }

    /// The endpoint opposite `id`, if the edge touches it.
    pub fn other(&self, id: &str) -> Option<&str> {
        if self.source == id {
            Some(self.target.as_str())
        } else if self.target == id {
            Some(self.source.as_str())
        } else {
            None
        }
    }
}

/// Nodes and edges ready for visualization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl KnowledgeGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edges touching the node with `id`.
    pub fn connections_of(&self, id: &str) -> Vec<&GraphEdge> {
        self.edges.iter().filter(|e| e.touches(id)).collect()
    }

    /// Ids of the nodes directly linked to `id`.
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        self.edges.iter().filter_map(|e| e.other(id)).collect()
    }

    /// Subgraph of one category, keeping only edges between its nodes.
    pub fn filter_by_category(&self, category: Category) -> KnowledgeGraph {
        let name = category.as_str();
        let nodes: Vec<GraphNode> = self
            .nodes
            .iter()
            .filter(|n| n.category == name)
            .cloned()
            .collect();
        let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        let edges = self
            .edges
            .iter()
            .filter(|e| ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()))
            .cloned()
            .collect();
        KnowledgeGraph { nodes, edges }
    }

    /// Distinct categories present, sorted by name.
    pub fn categories(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .map(|n| n.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
