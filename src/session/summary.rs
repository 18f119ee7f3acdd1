use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::scoring::{Rating, compute_percent};
use crate::session::Direction;

/// Final tally of a finished quiz. Built once, never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub correct_count: usize,
    pub total: usize,
    pub percent: u32,
    pub rating: Rating,
    pub participant_name: String,
    pub direction: Direction,
    pub word_set: String,
    pub finished_at: DateTime<Utc>,
}

impl SessionSummary {
    pub fn new(
        correct_count: usize,
        total: usize,
        participant_name: &str,
        direction: Direction,
        word_set: &str,
    ) -> Self {
        let percent = compute_percent(correct_count, total);
        Self {
            correct_count,
            total,
            percent,
            rating: Rating::from_percent(percent),
            participant_name: participant_name.to_string(),
            direction,
            word_set: word_set.to_string(),
            finished_at: Utc::now(),
        }
    }

    pub fn rating_message(&self) -> &'static str {
        self.rating.message()
    }

    /// "8 / 10 (80%)"
    pub fn score_line(&self) -> String {
        format!("{} / {} ({}%)", self.correct_count, self.total, self.percent)
    }
}
