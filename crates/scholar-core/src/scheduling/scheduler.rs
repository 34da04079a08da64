//! Review scheduler wrapping a pluggable strategy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::strategy::{BucketedStrategy, ReviewStrategy, Sm2Strategy};
use crate::config::{SchedulingConfig, StrategyKind};
use crate::error::{ScholarError, ScholarResult};
use crate::types::{ReviewState, Score};

/// Applies quiz results to review records.
///
/// Scores are validated before any strategy runs: a score outside `[0, 100]`
/// or a non-finite value is a caller bug and is rejected, not clamped.
#[derive(Debug)]
pub struct Scheduler {
    strategy: Box<dyn ReviewStrategy>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(BucketedStrategy::default())
    }
}

impl Scheduler {
    pub fn new(strategy: impl ReviewStrategy + 'static) -> Self {
        Self {
            strategy: Box::new(strategy),
        }
    }

    pub fn from_config(config: &SchedulingConfig) -> Self {
        match config.strategy {
            StrategyKind::Bucketed => Self::new(BucketedStrategy::from_config(config)),
            StrategyKind::Sm2 => Self::new(Sm2Strategy::new()),
        }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Record a quiz submission.
    ///
    /// With no prior record a fresh one is created for `user_id` and
    /// `concept_id`, so the first submission moves `review_count` from 0 to 1.
    pub fn schedule(
        &self,
        user_id: &str,
        concept_id: &str,
        prior: Option<&ReviewState>,
        score: f64,
        now: DateTime<Utc>,
    ) -> ScholarResult<ReviewState> {
        let prior = match prior {
            Some(state) => state.clone(),
            None => ReviewState::new(user_id, concept_id),
        };
        self.review(&prior, score, now)
    }

    /// Apply one submission to an existing record.
    ///
    /// A record already at `u32::MAX` reviews is rejected, since its count
    /// could not increase.
    pub fn review(
        &self,
        prior: &ReviewState,
        score: f64,
        now: DateTime<Utc>,
    ) -> ScholarResult<ReviewState> {
        let score = Score::new(score)?;
        if prior.review_count == u32::MAX {
            return Err(ScholarError::validation_with_suggestion(
                format!("Review count for concept '{}' is exhausted", prior.concept_id),
                "Reset the review record before scheduling it again",
            ));
        }
        let update = self.strategy.next_review(prior, score, now);

        let mut next = prior.clone();
        next.record(update, now);

        debug!(
            strategy = self.strategy.name(),
            concept_id = %next.concept_id,
            mastery = next.mastery_level,
            reviews = next.review_count,
            "scheduled review"
        );
        Ok(next)
    }
}

/// Plain result of [`compute_review_update`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewOutcome {
    pub mastery_level: u8,
    pub review_count: u32,
    pub next_review: DateTime<Utc>,
}

/// Compute the next review from bare values using the default strategy.
pub fn compute_review_update(
    prior_review_count: u32,
    prior_mastery_level: u8,
    score_percentage: f64,
    now: DateTime<Utc>,
) -> ScholarResult<ReviewOutcome> {
    let mut prior = ReviewState::new("", "");
    prior.review_count = prior_review_count;
    prior.mastery_level = prior_mastery_level;

    let next = Scheduler::default().review(&prior, score_percentage, now)?;
    Ok(ReviewOutcome {
        mastery_level: next.mastery_level,
        review_count: next.review_count,
        next_review: next.next_review.unwrap_or(now),
    })
}
