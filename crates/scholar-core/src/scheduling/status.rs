//! Display-facing review status.

use chrono::{DateTime, Utc};

use crate::types::{ReviewState, ReviewStatus};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Whole days until `next_review`, rounded up; negative when overdue.
pub fn days_until(next_review: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let diff_ms = (next_review - now).num_milliseconds() as f64;
    (diff_ms / MILLIS_PER_DAY).ceil() as i64
}

/// Categorize a due date relative to `now`.
pub fn review_status(next_review: Option<DateTime<Utc>>, now: DateTime<Utc>) -> ReviewStatus {
    let Some(next) = next_review else {
        return ReviewStatus::New;
    };
    match days_until(next, now) {
        d if d < 0 => ReviewStatus::Overdue,
        0 => ReviewStatus::Due,
        _ => ReviewStatus::Upcoming,
    }
}

/// Human-readable description of a due date.
pub fn format_next_review(next_review: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(next) = next_review else {
        return "Not scheduled".to_string();
    };
    let days = days_until(next, now);
    match days {
        d if d < 0 => format!("{} days overdue", d.abs()),
        0 => "Due today".to_string(),
        1 => "Due tomorrow".to_string(),
        d if d < 7 => format!("Due in {} days", d),
        d if d < 30 => format!("Due in {} weeks", ceil_div(d, 7)),
        d => format!("Due in {} months", ceil_div(d, 30)),
    }
}

fn ceil_div(n: i64, d: i64) -> i64 {
    (n + d - 1) / d
}

/// Records due at `now`: never scheduled first, then most overdue first.
pub fn due_for_review(states: &[ReviewState], now: DateTime<Utc>) -> Vec<&ReviewState> {
    let mut due: Vec<&ReviewState> = states.iter().filter(|s| s.is_due(now)).collect();
    // None sorts before Some, and earlier dates before later ones.
    due.sort_by_key(|s| s.next_review);
    due
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_review_status() {
        let now = Utc::now();
        assert_eq!(review_status(None, now), ReviewStatus::New);
        assert_eq!(
            review_status(Some(now - Duration::days(2)), now),
            ReviewStatus::Overdue
        );
        assert_eq!(
            review_status(Some(now - Duration::hours(3)), now),
            ReviewStatus::Due
        );
        assert_eq!(review_status(Some(now), now), ReviewStatus::Due);
        assert_eq!(
            review_status(Some(now + Duration::hours(3)), now),
            ReviewStatus::Upcoming
        );
    }

    #[test]
    fn test_format_next_review() {
        let now = Utc::now();
        let at = |d: i64| Some(now + Duration::days(d));
        assert_eq!(format_next_review(None, now), "Not scheduled");
        assert_eq!(format_next_review(at(-3), now), "3 days overdue");
        assert_eq!(format_next_review(Some(now), now), "Due today");
        assert_eq!(format_next_review(at(1), now), "Due tomorrow");
        assert_eq!(format_next_review(at(5), now), "Due in 5 days");
        assert_eq!(format_next_review(at(8), now), "Due in 2 weeks");
        assert_eq!(format_next_review(at(29), now), "Due in 5 weeks");
        assert_eq!(format_next_review(at(30), now), "Due in 1 months");
        assert_eq!(format_next_review(at(61), now), "Due in 3 months");
    }

    #[test]
    fn test_due_for_review_order() {
        let now = Utc::now();
        let mut a = ReviewState::new("u", "a");
        a.next_review = Some(now - Duration::days(1));
        let mut b = ReviewState::new("u", "b");
        b.next_review = Some(now - Duration::days(5));
        let c = ReviewState::new("u", "c");
        let mut d = ReviewState::new("u", "d");
        d.next_review = Some(now + Duration::days(1));

        let states = vec![a, b, c, d];
        let due: Vec<&str> = due_for_review(&states, now)
            .into_iter()
            .map(|s| s.concept_id.as_str())
            .collect();
        assert_eq!(due, vec!["c", "b", "a"]);
    }
}
