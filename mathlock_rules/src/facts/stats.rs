//! Per-fact mastery statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mastery statistics attached to one fact.
///
/// Only answer submission mutates these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FactStats {
    pub correct_count: u32,
    pub incorrect_count: u32,
    /// Consecutive correct answers on this fact. Zeroed by any miss.
    pub current_streak: u32,
    pub last_asked: Option<DateTime<Utc>>,
}

impl FactStats {
    /// Fresh, never-asked stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a correct answer given at `at`.
    pub fn record_correct(&mut self, at: DateTime<Utc>) {
        self.correct_count += 1;
        self.current_streak += 1;
        self.last_asked = Some(at);
    }

    /// Record an incorrect answer given at `at`.
    pub fn record_incorrect(&mut self, at: DateTime<Utc>) {
        self.incorrect_count += 1;
        self.current_streak = 0;
        self.last_asked = Some(at);
    }

    /// Record an answer, dispatching on correctness.
    pub fn record(&mut self, correct: bool, at: DateTime<Utc>) {
        if correct {
            self.record_correct(at);
        } else {
            self.record_incorrect(at);
        }
    }

    /// Total number of answers given for this fact.
    pub fn attempts(&self) -> u32 {
        self.correct_count + self.incorrect_count
    }

    /// Fraction of answers that were correct, or `None` if never answered.
    pub fn accuracy(&self) -> Option<f32> {
        match self.attempts() {
            0 => None,
            n => Some(self.correct_count as f32 / n as f32),
        }
    }
}
