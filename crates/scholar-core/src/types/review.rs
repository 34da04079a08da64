//! Per-user review state for a concept.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ScholarError, ScholarResult};

/// Highest mastery level.
pub const MAX_MASTERY: u8 = 5;

/// Default SM-2 ease factor for a fresh record.
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

fn default_ease_factor() -> f64 {
    DEFAULT_EASE_FACTOR
}

/// Spaced-repetition progress of one user on one concept.
///
/// Created on the first quiz submission and updated on every subsequent one;
/// never deleted. The SM-2 fields are carried so either scheduling strategy
/// can operate on the same record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewState {
    pub user_id: String,
    pub concept_id: String,
    /// Mastery in `[0, 5]`.
    #[serde(default)]
    pub mastery_level: u8,
    /// Submissions recorded so far. `Scheduler::review` refuses a record at
    /// `u32::MAX`, so the count increases on every accepted submission.
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub last_reviewed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub next_review: Option<DateTime<Utc>>,
    /// SM-2 ease factor (floor 1.3).
    #[serde(default = "default_ease_factor")]
    pub ease_factor: f64,
    /// SM-2 interval in days.
    #[serde(default)]
    pub interval_days: u32,
    /// SM-2 consecutive successful repetitions.
    #[serde(default)]
    pub repetitions: u32,
}

impl ReviewState {
    /// A record that has never been reviewed.
    pub fn new(user_id: impl Into<String>, concept_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            concept_id: concept_id.into(),
            mastery_level: 0,
            review_count: 0,
            last_reviewed: None,
            next_review: None,
            ease_factor: DEFAULT_EASE_FACTOR,
            interval_days: 0,
            repetitions: 0,
        }
    }

    /// Whether the concept should be reviewed at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review.map_or(true, |next| next <= now)
    }

    /// Apply the outcome of one quiz submission made at `now`.
    pub fn record(&mut self, update: ReviewUpdate, now: DateTime<Utc>) {
        self.mastery_level = update.mastery_level.min(MAX_MASTERY);
        self.review_count = self.review_count.saturating_add(1);
        self.last_reviewed = Some(now);
        self.next_review = Some(update.next_review);
        self.ease_factor = update.ease_factor;
        self.interval_days = update.interval_days;
        self.repetitions = update.repetitions;
    }
}

/// What a scheduling strategy decided for one submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewUpdate {
    pub mastery_level: u8,
    pub next_review: DateTime<Utc>,
    pub ease_factor: f64,
    pub interval_days: u32,
    pub repetitions: u32,
}

/// A quiz score percentage that has been checked to be finite and in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Score(f64);

impl Score {
    /// Validate a raw percentage.
    ///
    /// Out-of-range and non-finite values are rejected rather than clamped.
    pub fn new(percentage: f64) -> ScholarResult<Self> {
        if !percentage.is_finite() || !(0.0..=100.0).contains(&percentage) {
            return Err(ScholarError::invalid_score(percentage));
        }
        Ok(Self(percentage))
    }

    /// The percentage value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Score {
    type Error = ScholarError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Score::new(value)
    }
}

/// Display-facing review categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    /// Past its due day.
    Overdue,
    /// Due today.
    Due,
    /// Due on a later day.
    Upcoming,
    /// Never scheduled.
    New,
}
