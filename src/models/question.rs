// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

use crate::error::StoreError;

/// Option labels in display order.
pub const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

/// Represents the 'questions' table in the questions store.
/// Column names follow the imported past-paper data.
#[derive(Debug, Clone, FromRow)]
pub struct QuestionRow {
    pub course_code: String,
    pub year: String,
    pub position: i64,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,

    /// Correct option, 1-based into A..D.
    pub c: i64,
}

/// A multiple-choice question, loaded once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub subject: String,
    pub year: String,
    pub position: i64,
    pub prompt: String,
    pub options: [String; 4],

    /// 1-based index into `options`.
    pub correct_option: u8,
}

impl Question {
    /// Text of the correct option.
    pub fn correct_text(&self) -> &str {
        &self.options[usize::from(self.correct_option) - 1]
    }

    pub fn has_option(&self, text: &str) -> bool {
        self.options.iter().any(|o| o == text)
    }
}

impl TryFrom<QuestionRow> for Question {
    type Error = StoreError;

    fn try_from(row: QuestionRow) -> Result<Self, Self::Error> {
        let correct_option = u8::try_from(row.c)
            .ok()
            .filter(|c| (1..=4).contains(c))
            .ok_or_else(|| {
                StoreError::MalformedRow(format!(
                    "question {} of {} {} has correct option {}",
                    row.position, row.course_code, row.year, row.c
                ))
            })?;

        Ok(Question {
            subject: row.course_code,
            year: row.year,
            position: row.position,
            prompt: row.question,
            options: [row.option_a, row.option_b, row.option_c, row.option_d],
            correct_option,
        })
    }
}

/// DTO for sending the current question to the client (excludes the answer).
#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub subject: String,
    pub year: String,
    pub index: usize,
    pub total: usize,
    pub prompt: String,
    pub options: Vec<OptionView>,

    /// Previously recorded answer for this index, if any.
    pub selected: Option<String>,
    pub is_last: bool,
}

#[derive(Debug, Serialize)]
pub struct OptionView {
    pub label: char,
    pub text: String,
}

/// Seed file entry used to fill an empty questions store.
#[derive(Debug, Deserialize)]
pub struct QuestionSeed {
    pub course_code: String,
    pub year: String,
    pub position: i64,
    pub question: String,
    pub options: [String; 4],
    pub c: i64,
}
