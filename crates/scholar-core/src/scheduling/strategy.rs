//! Spaced-repetition strategies.
//!
//! Two formulas share one contract: the bucketed formula (mastery from the
//! score quintile, fixed interval ladder) and classic SM-2 (quality grade,
//! ease factor, repetitions).

use std::fmt::Debug;

use chrono::{DateTime, Duration, Utc};

use crate::config::SchedulingConfig;
use crate::types::{ReviewState, ReviewUpdate, Score, MAX_MASTERY};

/// SM-2 ease factor floor.
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Longest interval either strategy will schedule (about a century).
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// `now` plus a number of seconds, saturating at the latest representable time.
fn due_after(now: DateTime<Utc>, seconds: i64) -> DateTime<Utc> {
    now.checked_add_signed(Duration::seconds(seconds))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// A scheduling formula.
///
/// Implementations are pure: they read the prior state and the validated
/// score and decide the next mastery level and due date.
pub trait ReviewStrategy: Send + Sync + Debug {
    /// Short name used in logs and config.
    fn name(&self) -> &'static str;

    /// Compute the update for one submission.
    fn next_review(&self, prior: &ReviewState, score: Score, now: DateTime<Utc>) -> ReviewUpdate;
}

/// Mastery bucketed by score, interval from a fixed ladder.
///
/// ```text
/// mastery  = min(5, floor(score / 20))
/// interval = ladder[min(prior_review_count, len - 1)] * (1 + mastery * bonus)
/// ```
///
/// The interval is capped at [`MAX_INTERVAL_DAYS`].
#[derive(Debug, Clone)]
pub struct BucketedStrategy {
    intervals_days: Vec<u32>,
    mastery_bonus: f64,
}

impl Default for BucketedStrategy {
    fn default() -> Self {
        Self::from_config(&SchedulingConfig::default())
    }
}

impl BucketedStrategy {
    pub fn new(intervals_days: Vec<u32>, mastery_bonus: f64) -> Self {
        Self {
            intervals_days,
            mastery_bonus,
        }
    }

    pub fn from_config(config: &SchedulingConfig) -> Self {
        Self::new(config.intervals_days.clone(), config.mastery_bonus)
    }

    /// Mastery level for a score.
    pub fn mastery_for(score: Score) -> u8 {
        ((score.value() / 20.0).floor() as u8).min(MAX_MASTERY)
    }

    /// Base interval in days for a record reviewed `prior_count` times.
    ///
    /// Indexed by the count before this review, so a first perfect score is
    /// due in two days. Never below one day, so the next review is always in
    /// the future.
    pub fn base_interval(&self, prior_count: u32) -> u32 {
        let Some(last) = self.intervals_days.len().checked_sub(1) else {
            return 1;
        };
        let index = (prior_count as usize).min(last);
        self.intervals_days[index].max(1)
    }
}

impl ReviewStrategy for BucketedStrategy {
    fn name(&self) -> &'static str {
        "bucketed"
    }

    fn next_review(&self, prior: &ReviewState, score: Score, now: DateTime<Utc>) -> ReviewUpdate {
        let mastery_level = Self::mastery_for(score);
        let base = self.base_interval(prior.review_count);
        let days = f64::from(base) * (1.0 + f64::from(mastery_level) * self.mastery_bonus.max(0.0));
        let days = days.min(f64::from(MAX_INTERVAL_DAYS));

        ReviewUpdate {
            mastery_level,
            next_review: due_after(now, (days * SECONDS_PER_DAY).round() as i64),
            ease_factor: prior.ease_factor,
            interval_days: prior.interval_days,
            repetitions: prior.repetitions,
        }
    }
}

/// Map a score percentage to an SM-2 quality grade (0..=5).
pub fn quality_from_score(score: Score) -> u8 {
    match score.value() {
        s if s >= 90.0 => 5,
        s if s >= 80.0 => 4,
        s if s >= 60.0 => 3,
        s if s >= 40.0 => 2,
        s if s >= 20.0 => 1,
        _ => 0,
    }
}

/// SuperMemo 2.
///
/// Grades of 3 or more advance the schedule (1 day, 6 days, then the previous
/// interval times the ease factor); lower grades reset it to one day. The ease
/// factor is adjusted on every grade and floored at [`MIN_EASE_FACTOR`].
/// Intervals stop growing at [`MAX_INTERVAL_DAYS`]. Mastery is the quality
/// grade itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sm2Strategy;

impl Sm2Strategy {
    pub fn new() -> Self {
        Self
    }

    fn adjust_ease(ease_factor: f64, quality: u8) -> f64 {
        let miss = f64::from(5 - quality);
        (ease_factor + (0.1 - miss * (0.08 + miss * 0.02))).max(MIN_EASE_FACTOR)
    }
}

impl ReviewStrategy for Sm2Strategy {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn next_review(&self, prior: &ReviewState, score: Score, now: DateTime<Utc>) -> ReviewUpdate {
        let quality = quality_from_score(score);
        let ease_factor = if prior.ease_factor.is_finite() {
            prior.ease_factor.max(MIN_EASE_FACTOR)
        } else {
            MIN_EASE_FACTOR
        };

        let (interval_days, repetitions) = if quality >= 3 {
            let interval = match prior.repetitions {
                0 => 1,
                1 => 6,
                _ => {
                    let previous = f64::from(prior.interval_days.clamp(1, MAX_INTERVAL_DAYS));
                    ((previous * ease_factor).round() as u32).clamp(1, MAX_INTERVAL_DAYS)
                }
            };
            (interval, prior.repetitions.saturating_add(1))
        } else {
            (1, 0)
        };

        ReviewUpdate {
            mastery_level: quality,
            next_review: due_after(now, i64::from(interval_days) * SECONDS_PER_DAY as i64),
            ease_factor: Self::adjust_ease(ease_factor, quality),
            interval_days,
            repetitions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(v: f64) -> Score {
        Score::new(v).unwrap()
    }

    #[test]
    fn test_mastery_buckets() {
        assert_eq!(BucketedStrategy::mastery_for(score(0.0)), 0);
        assert_eq!(BucketedStrategy::mastery_for(score(19.9)), 0);
        assert_eq!(BucketedStrategy::mastery_for(score(20.0)), 1);
        assert_eq!(BucketedStrategy::mastery_for(score(59.0)), 2);
        assert_eq!(BucketedStrategy::mastery_for(score(99.9)), 4);
        assert_eq!(BucketedStrategy::mastery_for(score(100.0)), 5);
    }

    #[test]
    fn test_base_interval_ladder() {
        let strategy = BucketedStrategy::default();
        assert_eq!(strategy.base_interval(0), 1);
        assert_eq!(strategy.base_interval(1), 3);
        assert_eq!(strategy.base_interval(5), 60);
        assert_eq!(strategy.base_interval(40), 60);

        let empty = BucketedStrategy::new(vec![], 0.2);
        assert_eq!(empty.base_interval(3), 1);
    }

    #[test]
    fn test_bucketed_first_perfect_review() {
        let now = Utc::now();
        let prior = ReviewState::new("u", "c");
        let update = BucketedStrategy::default().next_review(&prior, score(100.0), now);
        assert_eq!(update.mastery_level, 5);
        assert_eq!(update.next_review, now + Duration::days(2));
    }

    #[test]
    fn test_bucketed_fractional_days() {
        let now = Utc::now();
        let mut prior = ReviewState::new("u", "c");
        prior.review_count = 1;
        // 3 * (1 + 2 * 0.2) = 4.2 days
        let update = BucketedStrategy::default().next_review(&prior, score(45.0), now);
        assert_eq!(update.mastery_level, 2);
        assert_eq!(
            update.next_review,
            now + Duration::days(4) + Duration::seconds(17_280)
        );
    }

    #[test]
    fn test_quality_from_score() {
        assert_eq!(quality_from_score(score(95.0)), 5);
        assert_eq!(quality_from_score(score(90.0)), 5);
        assert_eq!(quality_from_score(score(85.0)), 4);
        assert_eq!(quality_from_score(score(60.0)), 3);
        assert_eq!(quality_from_score(score(59.9)), 2);
        assert_eq!(quality_from_score(score(20.0)), 1);
        assert_eq!(quality_from_score(score(5.0)), 0);
    }

    #[test]
    fn test_sm2_progression() {
        let now = Utc::now();
        let strategy = Sm2Strategy::new();
        let mut state = ReviewState::new("u", "c");

        let first = strategy.next_review(&state, score(100.0), now);
        assert_eq!(first.interval_days, 1);
        assert_eq!(first.repetitions, 1);
        assert!((first.ease_factor - 2.6).abs() < 1e-9);
        state.record(first, now);

        let second = strategy.next_review(&state, score(100.0), now);
        assert_eq!(second.interval_days, 6);
        state.record(second, now);

        let third = strategy.next_review(&state, score(100.0), now);
        // round(6 * 2.7)
        assert_eq!(third.interval_days, 16);
        assert_eq!(third.repetitions, 3);
        assert_eq!(third.next_review, now + Duration::days(16));
    }

    #[test]
    fn test_sm2_failure_resets() {
        let now = Utc::now();
        let mut state = ReviewState::new("u", "c");
        state.repetitions = 4;
        state.interval_days = 30;
        state.ease_factor = 1.35;

        let update = Sm2Strategy::new().next_review(&state, score(10.0), now);
        assert_eq!(update.repetitions, 0);
        assert_eq!(update.interval_days, 1);
        assert_eq!(update.mastery_level, 0);
        assert_eq!(update.ease_factor, MIN_EASE_FACTOR);
    }

    #[test]
    fn test_sm2_corrupt_interval_guarded() {
        let now = Utc::now();
        let mut state = ReviewState::new("u", "c");
        state.repetitions = 3;
        state.interval_days = 0;
        state.ease_factor = f64::NAN;

        let update = Sm2Strategy::new().next_review(&state, score(100.0), now);
        assert!(update.interval_days >= 1);
        assert!(update.next_review > now);
    }

    #[test]
    fn test_intervals_capped() {
        let now = Utc::now();
        let mut state = ReviewState::new("u", "c");
        state.repetitions = 3;
        state.interval_days = 100_000_000;

        let update = Sm2Strategy::new().next_review(&state, score(100.0), now);
        assert_eq!(update.interval_days, MAX_INTERVAL_DAYS);
        assert_eq!(
            update.next_review,
            now + Duration::days(i64::from(MAX_INTERVAL_DAYS))
        );

        let ladder = BucketedStrategy::new(vec![u32::MAX], 0.2);
        let update = ladder.next_review(&ReviewState::new("u", "c"), score(100.0), now);
        assert_eq!(
            update.next_review,
            now + Duration::days(i64::from(MAX_INTERVAL_DAYS))
        );
    }

    #[test]
    fn test_due_after_saturates() {
        assert_eq!(
            due_after(DateTime::<Utc>::MAX_UTC, 86_400),
            DateTime::<Utc>::MAX_UTC
        );
    }
}
