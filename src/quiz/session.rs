// src/quiz/session.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{
    error::QuizError,
    models::question::{OPTION_LABELS, OptionView, Question, QuestionView},
    quiz::scoring::{ScoringResult, score},
};

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Active { index: usize },

    /// Scored and waiting for the result to be recorded.
    Finished { result: ScoringResult },
}

/// One in-progress attempt at a subject/year question set.
///
/// Owned by the caller; every operation either applies fully or returns an
/// error and leaves the session untouched.
#[derive(Debug, Clone)]
pub struct QuizSession {
    subject: String,
    year: String,
    questions: Vec<Question>,
    state: SessionState,
    answers: BTreeMap<usize, String>,
    started_at: DateTime<Utc>,
}

impl QuizSession {
    /// Starts a session at the first question.
    pub fn start(
        subject: impl Into<String>,
        year: impl Into<String>,
        questions: Vec<Question>,
        now: DateTime<Utc>,
    ) -> Result<Self, QuizError> {
        let subject = subject.into();
        let year = year.into();

        if questions.is_empty() {
            return Err(QuizError::EmptyQuestionSet { subject, year });
        }

        Ok(Self {
            subject,
            year,
            questions,
            state: SessionState::Active { index: 0 },
            answers: BTreeMap::new(),
            started_at: now,
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &BTreeMap<usize, String> {
        &self.answers
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, SessionState::Finished { .. })
    }

    /// Current index, or `None` once finished.
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            SessionState::Active { index } => Some(index),
            SessionState::Finished { .. } => None,
        }
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().map(|i| &self.questions[i])
    }

    pub fn selected_answer(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    fn active_index(&self, action: &str) -> Result<usize, QuizError> {
        self.current_index().ok_or_else(|| {
            QuizError::InvalidTransition(format!("cannot {} a finished quiz", action))
        })
    }

    /// Records the option text chosen for the current question.
    pub fn select_answer(&mut self, index: usize, option: &str) -> Result<(), QuizError> {
        let current = self.active_index("answer")?;
        if index != current {
            return Err(QuizError::InvalidTransition(format!(
                "question {} is not the current question ({})",
                index, current
            )));
        }

        if !self.questions[index].has_option(option) {
            return Err(QuizError::InvalidAnswer(format!(
                "'{}' is not an option of question {}",
                option,
                index + 1
            )));
        }

        self.answers.insert(index, option.to_string());
        Ok(())
    }

    pub fn previous(&mut self) -> Result<usize, QuizError> {
        let index = self.active_index("navigate")?;
        if index == 0 {
            return Err(QuizError::InvalidTransition(
                "already at the first question".to_string(),
            ));
        }
        self.state = SessionState::Active { index: index - 1 };
        Ok(index - 1)
    }

    pub fn next(&mut self) -> Result<usize, QuizError> {
        let index = self.active_index("navigate")?;
        if index + 1 >= self.questions.len() {
            return Err(QuizError::InvalidTransition(
                "already at the last question".to_string(),
            ));
        }
        self.state = SessionState::Active { index: index + 1 };
        Ok(index + 1)
    }

    /// Scores the attempt. Only allowed on the last question.
    ///
    /// Once finished, further calls return the cached result unchanged so a
    /// failed write can be retried with the same scores.
    pub fn finish(&mut self, now: DateTime<Utc>) -> Result<ScoringResult, QuizError> {
        let index = match &self.state {
            SessionState::Finished { result } => return Ok(result.clone()),
            SessionState::Active { index } => *index,
        };

        let last = self.questions.len() - 1;
        if index != last {
            return Err(QuizError::InvalidTransition(format!(
                "finish is only allowed on the last question ({} of {})",
                index + 1,
                last + 1
            )));
        }

        let elapsed = (now - self.started_at).num_milliseconds().max(0) as f64 / 1000.0;
        let result = ScoringResult {
            subject: self.subject.clone(),
            year: self.year.clone(),
            tally: score(&self.questions, &self.answers),
            elapsed_seconds: elapsed,
            created_at: now,
        };

        self.state = SessionState::Finished {
            result: result.clone(),
        };
        Ok(result)
    }

    /// Resets to a fresh attempt over the same question set.
    pub fn restart(&mut self, now: DateTime<Utc>) {
        self.state = SessionState::Active { index: 0 };
        self.answers.clear();
        self.started_at = now;
    }

    /// Client view of the current question. `None` once finished.
    pub fn view(&self) -> Option<QuestionView> {
        let index = self.current_index()?;
        let question = &self.questions[index];

        Some(QuestionView {
            subject: self.subject.clone(),
            year: self.year.clone(),
            index,
            total: self.questions.len(),
            prompt: question.prompt.clone(),
            options: OPTION_LABELS
                .iter()
                .zip(question.options.iter())
                .map(|(label, text)| OptionView {
                    label: *label,
                    text: text.clone(),
                })
                .collect(),
            selected: self.answers.get(&index).cloned(),
            is_last: index + 1 == self.questions.len(),
        })
    }
}
