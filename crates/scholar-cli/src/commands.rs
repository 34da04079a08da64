//! Subcommand handlers. Each returns the JSON value printed by `main`.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use tracing::{info, warn};

use scholar_core::config::{ScholarConfig, SchedulingConfig};
use scholar_core::scheduling::{days_until, format_next_review, review_status};
use scholar_core::traits::{ConceptEnhancer, QuestionGenerator};
use scholar_core::types::MAX_MASTERY;
use scholar_core::{
    build_knowledge_graph, classify_category, enhance_or_fallback, Category, Concept,
    ConceptIngestor, QuizBuilder, ReviewState, Scheduler, TermExtractor,
};
use scholar_llm::{LlmConceptEnhancer, LlmFactory, LlmQuestionGenerator};

/// Read a file, or stdin when no path is given.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

pub fn extract(config: &ScholarConfig, file: Option<&Path>) -> Result<Value> {
    let text = read_input(file)?;
    let terms = TermExtractor::new(config.extraction.clone()).extract(&text);
    Ok(json!(terms))
}

pub fn ingest(
    config: &ScholarConfig,
    file: Option<&Path>,
    terms: &[String],
    existing: &[String],
) -> Result<Value> {
    let text = read_input(file)?;
    let concepts = ConceptIngestor::new(config.extraction.clone()).ingest(&text, terms, existing)?;
    Ok(serde_json::to_value(concepts)?)
}

pub fn classify(text: &str) -> Value {
    let category = classify_category(text);
    json!({
        "category": category,
        "modelType": category.model_type(),
    })
}

/// Review history supplied on the command line.
pub struct PriorReview {
    pub review_count: u32,
    pub mastery: u8,
    pub ease_factor: Option<f64>,
    pub interval: u32,
    pub repetitions: u32,
}

impl PriorReview {
    fn to_state(&self) -> ReviewState {
        let mut state = ReviewState::new("cli", "cli");
        state.review_count = self.review_count;
        state.mastery_level = self.mastery;
        if let Some(ease_factor) = self.ease_factor {
            state.ease_factor = ease_factor;
        }
        state.interval_days = self.interval;
        state.repetitions = self.repetitions;
        state
    }
}

pub fn schedule(scheduling: &SchedulingConfig, prior: &PriorReview, score: f64) -> Result<Value> {
    if prior.mastery > MAX_MASTERY {
        bail!("mastery must be between 0 and {}", MAX_MASTERY);
    }

    let scheduler = Scheduler::from_config(scheduling);
    let now = Utc::now();
    let state = scheduler.review(&prior.to_state(), score, now)?;

    Ok(json!({
        "strategy": scheduler.strategy_name(),
        "masteryLevel": state.mastery_level,
        "reviewCount": state.review_count,
        "nextReview": state.next_review,
        "easeFactor": state.ease_factor,
        "intervalDays": state.interval_days,
        "repetitions": state.repetitions,
        "label": format_next_review(state.next_review, now),
    }))
}

pub fn graph(file: Option<&Path>, category: Option<&str>) -> Result<Value> {
    let concepts: Vec<Concept> =
        serde_json::from_str(&read_input(file)?).context("expected a JSON array of concepts")?;
    let mut graph = build_knowledge_graph(&concepts);
    if let Some(name) = category {
        let category: Category = name
            .parse()
            .with_context(|| format!("unknown category '{}'", name))?;
        graph = graph.filter_by_category(category);
    }
    info!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "built knowledge graph"
    );
    Ok(serde_json::to_value(graph)?)
}

pub async fn quiz(
    config: &ScholarConfig,
    file: Option<&Path>,
    offline: bool,
    title: Option<&str>,
) -> Result<Value> {
    let concept: Concept =
        serde_json::from_str(&read_input(file)?).context("expected a JSON concept")?;

    let mut builder = QuizBuilder::from_config(&config.quiz);
    if !offline && config.quiz.ai_enabled {
        match LlmFactory::from_config(&config.llm) {
            Ok(llm) => {
                let generator: Arc<dyn QuestionGenerator> = Arc::new(LlmQuestionGenerator::new(llm));
                builder = builder.with_generator(generator);
            }
            Err(e) => warn!(error = %e, "no LLM available, using template questions"),
        }
    }

    let quiz = builder.build(&concept, title).await;
    Ok(serde_json::to_value(quiz)?)
}

pub async fn enhance(config: &ScholarConfig, term: &str, offline: bool) -> Value {
    let enhancer = if offline {
        None
    } else {
        match LlmFactory::from_config(&config.llm) {
            Ok(llm) => Some(LlmConceptEnhancer::new(llm)),
            Err(e) => {
                warn!(error = %e, "no LLM available, using template enhancement");
                None
            }
        }
    };

    let enhancement = enhance_or_fallback(
        enhancer.as_ref().map(|e| e as &dyn ConceptEnhancer),
        term,
    )
    .await;
    json!({ term: enhancement })
}

pub fn status(next_review: Option<&str>) -> Result<Value> {
    let next_review = next_review
        .map(|s| {
            DateTime::parse_from_rfc3339(s)
                .map(|t| t.with_timezone(&Utc))
                .with_context(|| format!("'{}' is not an RFC 3339 timestamp", s))
        })
        .transpose()?;

    let now = Utc::now();
    Ok(json!({
        "status": review_status(next_review, now),
        "daysUntil": next_review.map(|t| days_until(t, now)),
        "label": format_next_review(next_review, now),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_core::config::StrategyKind;

    #[test]
    fn test_classify_output() {
        let value = classify("DNA replication and gene expression");
        assert_eq!(value["category"], "Biology");
        assert_eq!(value["modelType"], "organic-structure");
    }

    #[test]
    fn test_schedule_bucketed() {
        let prior = PriorReview {
            review_count: 0,
            mastery: 0,
            ease_factor: None,
            interval: 0,
            repetitions: 0,
        };
        let value = schedule(&SchedulingConfig::default(), &prior, 100.0).unwrap();
        assert_eq!(value["strategy"], "bucketed");
        assert_eq!(value["masteryLevel"], 5);
        assert_eq!(value["reviewCount"], 1);
        assert_eq!(value["label"], "Due in 2 days");
    }

    #[test]
    fn test_schedule_sm2() {
        let scheduling = SchedulingConfig {
            strategy: StrategyKind::Sm2,
            ..Default::default()
        };
        let prior = PriorReview {
            review_count: 2,
            mastery: 4,
            ease_factor: Some(2.5),
            interval: 6,
            repetitions: 2,
        };
        let value = schedule(&scheduling, &prior, 100.0).unwrap();
        assert_eq!(value["strategy"], "sm2");
        assert_eq!(value["intervalDays"], 15);
        assert_eq!(value["repetitions"], 3);
    }

    #[test]
    fn test_schedule_sm2_huge_interval() {
        let scheduling = SchedulingConfig {
            strategy: StrategyKind::Sm2,
            ..Default::default()
        };
        let prior = PriorReview {
            review_count: 3,
            mastery: 5,
            ease_factor: None,
            interval: 100_000_000,
            repetitions: 3,
        };
        let value = schedule(&scheduling, &prior, 100.0).unwrap();
        assert_eq!(value["intervalDays"], 36_500);
        assert_eq!(value["label"], "Due in 1217 months");
    }

    #[test]
    fn test_schedule_rejects_bad_input() {
        let prior = PriorReview {
            review_count: 0,
            mastery: 9,
            ease_factor: None,
            interval: 0,
            repetitions: 0,
        };
        assert!(schedule(&SchedulingConfig::default(), &prior, 50.0).is_err());

        let prior = PriorReview { mastery: 0, ..prior };
        assert!(schedule(&SchedulingConfig::default(), &prior, 120.0).is_err());
    }

    #[test]
    fn test_status_output() {
        assert_eq!(status(None).unwrap()["label"], "Not scheduled");
        assert_eq!(status(None).unwrap()["status"], "new");
        assert!(status(Some("tomorrow")).is_err());

        let past = (Utc::now() - chrono::Duration::days(3)).to_rfc3339();
        assert_eq!(status(Some(&past)).unwrap()["status"], "overdue");
    }

    #[tokio::test]
    async fn test_offline_quiz() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("concept.json");
        std::fs::write(
            &path,
            r#"{"id": "c1", "term": "Aperture", "definition": "Opening of a lens", "category": "Cinematography"}"#,
        )
        .unwrap();

        let value = quiz(&ScholarConfig::default(), Some(&path), true, None)
            .await
            .unwrap();
        assert_eq!(value["title"], "Aperture Quiz");
        assert_eq!(value["questions"].as_array().unwrap().len(), 5);
    }
}
