// src/store/mod.rs

//! Collaborators of the quiz core: where questions come from, where results
//! go, and what time it is.

pub mod sqlite;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    error::StoreError,
    models::{exam_record::TestRecord, question::Question},
    quiz::scoring::ScoringResult,
};

pub use sqlite::{SqliteQuestionStore, SqliteResultStore};

/// Read-only provider of ordered question sets.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Questions of one paper in position order. Empty when the key is unknown.
    async fn get_questions(&self, subject: &str, year: &str) -> Result<Vec<Question>, StoreError>;
}

/// Append-only store of finished attempts.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Appends one record and returns its id.
    async fn record(&self, result: &ScoringResult) -> Result<i64, StoreError>;

    /// All records, newest first.
    async fn list(&self) -> Result<Vec<TestRecord>, StoreError>;

    /// Removes a record. Returns whether a row was deleted.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
