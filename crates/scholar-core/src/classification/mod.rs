//! Keyword-based subject classification.
//!
//! Rules are evaluated in order and the first match wins. Several keyword
//! sets overlap ("memory" is hardware vocabulary but shows up in biology
//! text, "ai" is a substring of many words), so the order is part of the
//! behavior and the rules are kept as a list rather than a map.

use tracing::debug;

use crate::types::Category;

/// One classification rule: any keyword appearing as a substring of the
/// lowercased text selects the category.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule {
    pub category: Category,
    pub keywords: &'static [&'static str],
}

impl KeywordRule {
    fn matches(&self, text_lower: &str) -> bool {
        self.keywords.iter().any(|k| text_lower.contains(*k))
    }
}

const fn rule(category: Category, keywords: &'static [&'static str]) -> KeywordRule {
    KeywordRule { category, keywords }
}

/// Rules in priority order.
pub const RULES: &[KeywordRule] = &[
    rule(
        Category::Hardware,
        &[
            "computer", "hardware", "cpu", "processor", "monitor", "keyboard", "circuit",
            "motherboard", "gpu", "memory", "ram", "storage",
        ],
    ),
    // Genetics
    rule(
        Category::Biology,
        &["dna", "helix", "gene", "chromosome", "nucleotide", "genetic"],
    ),
    // Cardiovascular
    rule(
        Category::Biology,
        &[
            "heart", "cardiac", "ventricle", "atrium", "valve", "blood", "artery", "vein",
            "cardiovascular", "circulation", "chamber", "myocardium", "endocardium",
            "pericardium",
        ],
    ),
    rule(
        Category::Biology,
        &[
            "cell", "organism", "photosynthesis", "biology", "lung", "liver", "brain", "kidney",
            "muscle", "bone", "neuron", "enzyme", "protein", "amino", "anatomy", "organ",
            "tissue", "mitochondria",
        ],
    ),
    rule(
        Category::AiMl,
        &[
            "algorithm", "machine learning", "neural", "training", "ai",
            "artificial intelligence", "deep learning",
        ],
    ),
    rule(
        Category::Chemistry,
        &[
            "atom", "molecule", "element", "reaction", "chemistry", "bond", "compound", "ion",
            "periodic",
        ],
    ),
    rule(
        Category::Physics,
        &[
            "force", "motion", "energy", "wave", "physics", "gravity", "velocity",
            "acceleration", "momentum",
        ],
    ),
    rule(
        Category::Mathematics,
        &[
            "equation", "theorem", "formula", "geometry", "mathematics", "calculus", "integral",
            "derivative", "matrix",
        ],
    ),
    rule(
        Category::SoftwareEngineering,
        &[
            "design pattern", "architecture", "software", "development", "code", "framework",
            "library", "programming",
        ],
    ),
    rule(
        Category::DataScience,
        &["data", "analysis", "statistics", "visualization", "dataset", "analytics"],
    ),
    rule(
        Category::Databases,
        &["database", "sql", "query", "table", "index", "relational"],
    ),
    rule(
        Category::WebDevelopment,
        &["html", "css", "javascript", "react", "web", "frontend", "backend"],
    ),
    rule(
        Category::Cinematography,
        &[
            "cinematography", "film", "video", "camera", "shot", "frame", "lighting", "editing",
            "director", "production", "photography", "composition", "lens", "exposure",
            "color grading",
        ],
    ),
];

/// Maps free text to a [`Category`].
///
/// Total: every input yields a category, [`Category::General`] when nothing
/// matches.
#[derive(Debug, Clone, Copy)]
pub struct CategoryClassifier {
    rules: &'static [KeywordRule],
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryClassifier {
    pub fn new() -> Self {
        Self { rules: RULES }
    }

    /// Classify a piece of text.
    pub fn classify(&self, text: &str) -> Category {
        let lower = text.to_lowercase();
        self.rules
            .iter()
            .find(|r| r.matches(&lower))
            .map(|r| r.category)
            .unwrap_or(Category::General)
    }

    /// Classify a concept extracted from `source_text`.
    ///
    /// A broad document can classify as `General` while the concept itself is
    /// domain-specific, so `term + " " + definition` is tried before settling.
    pub fn classify_concept(&self, source_text: &str, term: &str, definition: &str) -> Category {
        let category = self.classify(source_text);
        if category != Category::General {
            return category;
        }
        let category = self.classify(&format!("{} {}", term, definition));
        debug!(term, %category, "classified from term and definition");
        category
    }
}

/// Classify text with the default rule set.
pub fn classify_category(text: &str) -> Category {
    CategoryClassifier::new().classify(text)
}
