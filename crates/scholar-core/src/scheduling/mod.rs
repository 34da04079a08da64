//! Spaced-repetition review scheduling.

mod scheduler;
mod status;
mod strategy;

pub use scheduler::{compute_review_update, ReviewOutcome, Scheduler};
pub use status::{days_until, due_for_review, format_next_review, review_status};
pub use strategy::{
    quality_from_score, BucketedStrategy, ReviewStrategy, Sm2Strategy, MAX_INTERVAL_DAYS,
    MIN_EASE_FACTOR,
};
