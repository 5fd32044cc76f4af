// src/quiz/scoring.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::question::Question;

/// Bucket counts for one graded attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub correct: u32,
    pub missed: u32,
    pub wrong: u32,
}

impl Tally {
    pub fn total(&self) -> u32 {
        self.correct + self.missed + self.wrong
    }
}

/// Outcome of a finished session, ready to be recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringResult {
    pub subject: String,
    pub year: String,
    pub tally: Tally,
    pub elapsed_seconds: f64,
    pub created_at: DateTime<Utc>,
}

/// Grades every question of the set, answered or not.
///
/// An index with no recorded answer is missed, an exact text match with the
/// correct option is correct, anything else is wrong. Answers recorded for
/// indexes outside the set are ignored.
pub fn score(questions: &[Question], answers: &BTreeMap<usize, String>) -> Tally {
    let mut tally = Tally::default();

    for (idx, question) in questions.iter().enumerate() {
        match answers.get(&idx) {
            None => tally.missed += 1,
            Some(answer) if answer == question.correct_text() => tally.correct += 1,
            Some(_) => tally.wrong += 1,
        }
    }

    tally
}
