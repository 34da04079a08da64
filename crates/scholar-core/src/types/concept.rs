//! Concept records: the unit of study.

use chrono::{DateTime, Utc};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

use super::Category;

/// Difficulty of a concept.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

/// A reference from one concept to another.
///
/// Stored records mix two shapes: a bare term string, or an object carrying
/// the referenced concept's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelatedConcept {
    /// Reference by term (matched case-insensitively against labels).
    Term(String),
    /// Reference by concept id.
    Reference { id: String },
}

impl RelatedConcept {
    /// Whether this reference points at the concept with the given id/term.
    pub fn refers_to(&self, id: &str, term: &str) -> bool {
        match self {
            RelatedConcept::Term(t) => t.to_lowercase() == term.to_lowercase(),
            RelatedConcept::Reference { id: ref_id } => ref_id == id,
        }
    }
}

impl From<&str> for RelatedConcept {
    fn from(term: &str) -> Self {
        RelatedConcept::Term(term.to_string())
    }
}

impl From<String> for RelatedConcept {
    fn from(term: String) -> Self {
        RelatedConcept::Term(term)
    }
}

/// A learned term with its definition and classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    pub id: String,
    pub term: String,
    #[serde(default)]
    pub definition: String,
    /// Missing, empty, or unrecognized stored values read as `General`.
    #[serde(default, deserialize_with = "lenient_category")]
    pub category: Category,
    #[serde(default)]
    pub difficulty: Difficulty,
    /// At most three references, backfilled after enrichment.
    #[serde(default)]
    pub related_concepts: Vec<RelatedConcept>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn lenient_category<'de, D>(deserializer: D) -> Result<Category, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .and_then(|s| Category::from_str(s.trim()).ok())
        .unwrap_or_default())
}

impl Concept {
    /// Maximum number of related-concept references kept on a record.
    pub const MAX_RELATED: usize = 3;

    /// Create a new concept with a fresh id.
    pub fn new(term: impl Into<String>, definition: impl Into<String>, category: Category) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            term: term.into(),
            definition: definition.into(),
            category,
            difficulty: Difficulty::default(),
            related_concepts: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Use a specific id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set related concepts, keeping at most [`Concept::MAX_RELATED`].
    pub fn with_related<I, R>(mut self, related: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RelatedConcept>,
    {
        self.related_concepts = related
            .into_iter()
            .map(Into::into)
            .take(Self::MAX_RELATED)
            .collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_related_capped_at_three() {
        let concept = Concept::new("photosynthesis", "Plants make sugar", Category::Biology)
            .with_related(["chlorophyll", "glucose", "light", "water"]);
        assert_eq!(concept.related_concepts.len(), 3);
    }

    #[test]
    fn test_related_concept_untagged_serde() {
        let parsed: Vec<RelatedConcept> =
            serde_json::from_str(r#"["mitosis", {"id": "c-42"}]"#).unwrap();
        assert_eq!(parsed[0], RelatedConcept::Term("mitosis".to_string()));
        assert_eq!(
            parsed[1],
            RelatedConcept::Reference {
                id: "c-42".to_string()
            }
        );
    }

    #[test]
    fn test_refers_to() {
        let by_term = RelatedConcept::from("Mitosis");
        assert!(by_term.refers_to("x", "mitosis"));
        assert!(!by_term.refers_to("x", "meiosis"));

        let by_id = RelatedConcept::Reference { id: "c-1".into() };
        assert!(by_id.refers_to("c-1", "anything"));
    }

    #[test]
    fn test_lenient_category() {
        let empty: Concept =
            serde_json::from_str(r#"{"id": "1", "term": "x", "category": ""}"#).unwrap();
        assert_eq!(empty.category, Category::General);

        let null: Concept =
            serde_json::from_str(r#"{"id": "1", "term": "x", "category": null}"#).unwrap();
        assert_eq!(null.category, Category::General);

        let known: Concept =
            serde_json::from_str(r#"{"id": "1", "term": "x", "category": "AI & ML"}"#).unwrap();
        assert_eq!(known.category, Category::AiMl);
    }

    #[test]
    fn test_concept_camel_case_wire_format() {
        let json = r#"{
            "id": "c-1",
            "term": "enzyme",
            "definition": "A protein catalyst",
            "category": "Biology",
            "relatedConcepts": ["protein"]
        }"#;
        let concept: Concept = serde_json::from_str(json).unwrap();
        assert_eq!(concept.category, Category::Biology);
        assert_eq!(concept.difficulty, Difficulty::Intermediate);
        assert_eq!(concept.related_concepts.len(), 1);

        let out = serde_json::to_value(&concept).unwrap();
        assert!(out.get("relatedConcepts").is_some());
        assert_eq!(out["difficulty"], "intermediate");
    }
}
