// src/store/sqlite.rs

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;

use crate::{
    error::StoreError,
    models::{
        exam_record::{
            DATE_TIME_FORMAT, PerformancePoint, PerformanceTotals, ScoreAnalysis, SubjectAverage,
            SubjectCount, TestRecord, UpcomingTest,
        },
        question::{Question, QuestionRow, QuestionSeed},
    },
    quiz::scoring::ScoringResult,
    store::{QuestionStore, ResultStore},
};

/// Opens a SQLite pool, retrying while the file system is not ready.
pub async fn connect(url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

    let mut retry_count = 0;
    loop {
        match SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options.clone())
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(e) => {
                retry_count += 1;
                if retry_count > 5 {
                    return Err(e);
                }
                tracing::warn!(
                    "Database {} not ready, retrying in 2s... (Attempt {})",
                    url,
                    retry_count
                );
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    }
}

/// Question store backed by the `questions` table.
#[derive(Clone)]
pub struct SqliteQuestionStore {
    pool: SqlitePool,
}

impl SqliteQuestionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Loads seed questions when the table is empty. Returns the number inserted.
    pub async fn seed_if_empty(&self, seeds: &[QuestionSeed]) -> Result<usize, StoreError> {
        let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await?;
        if existing > 0 {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        for seed in seeds {
            let [a, b, c, d] = &seed.options;
            sqlx::query(
                r#"
                INSERT INTO questions
                    (course_code, year, position, question, option_a, option_b, option_c, option_d, c)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&seed.course_code)
            .bind(&seed.year)
            .bind(seed.position)
            .bind(&seed.question)
            .bind(a)
            .bind(b)
            .bind(c)
            .bind(d)
            .bind(seed.c)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(seeds.len())
    }
}

#[async_trait]
impl QuestionStore for SqliteQuestionStore {
    async fn get_questions(&self, subject: &str, year: &str) -> Result<Vec<Question>, StoreError> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT course_code, year, position, question,
                   option_a, option_b, option_c, option_d, c
            FROM questions
            WHERE course_code = ? AND year = ?
            ORDER BY position
            "#,
        )
        .bind(subject)
        .bind(year)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Question::try_from).collect()
    }
}

/// Result store backed by the `test_records` table.
#[derive(Clone)]
pub struct SqliteResultStore {
    pool: SqlitePool,
}

impl SqliteResultStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Records dated strictly after `now`.
    pub async fn upcoming(&self, now: DateTime<Utc>) -> Result<Vec<UpcomingTest>, StoreError> {
        let tests = sqlx::query_as::<_, UpcomingTest>(
            r#"
            SELECT subject, year, date_time
            FROM test_records
            WHERE date_time > ?
            ORDER BY date_time
            "#,
        )
        .bind(now.format(DATE_TIME_FORMAT).to_string())
        .fetch_all(&self.pool)
        .await?;

        Ok(tests)
    }

    /// Aggregates every record for the score analysis page.
    pub async fn analysis(&self) -> Result<ScoreAnalysis, StoreError> {
        let subject_distribution = sqlx::query_as::<_, SubjectCount>(
            r#"
            SELECT subject, COUNT(*) AS attempts
            FROM test_records
            GROUP BY subject
            ORDER BY attempts DESC, subject
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let performance_over_time = sqlx::query_as::<_, PerformancePoint>(
            r#"
            SELECT date_time,
                   SUM(correct_answer) AS correct_answer,
                   SUM(missed) AS missed,
                   SUM(wrong) AS wrong
            FROM test_records
            GROUP BY date_time
            ORDER BY date_time
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let subject_averages = sqlx::query_as::<_, SubjectAverage>(
            r#"
            SELECT subject,
                   COUNT(*) AS attempts,
                   AVG(correct_answer) AS correct_answer,
                   AVG(missed) AS missed,
                   AVG(wrong) AS wrong
            FROM test_records
            GROUP BY subject
            ORDER BY subject
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let (correct_answer, missed, wrong): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(correct_answer), 0),
                   COALESCE(SUM(missed), 0),
                   COALESCE(SUM(wrong), 0)
            FROM test_records
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(ScoreAnalysis {
            subject_distribution,
            performance_over_time,
            subject_averages,
            totals: PerformanceTotals {
                correct_answer,
                missed,
                wrong,
            },
        })
    }
}

#[async_trait]
impl ResultStore for SqliteResultStore {
    async fn record(&self, result: &ScoringResult) -> Result<i64, StoreError> {
        let outcome = sqlx::query(
            r#"
            INSERT INTO test_records
                (date_time, subject, year, correct_answer, missed, wrong, elapsed_seconds)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(result.created_at.format(DATE_TIME_FORMAT).to_string())
        .bind(&result.subject)
        .bind(&result.year)
        .bind(i64::from(result.tally.correct))
        .bind(i64::from(result.tally.missed))
        .bind(i64::from(result.tally.wrong))
        .bind(result.elapsed_seconds)
        .execute(&self.pool)
        .await?;

        Ok(outcome.last_insert_rowid())
    }

    async fn list(&self) -> Result<Vec<TestRecord>, StoreError> {
        let records = sqlx::query_as::<_, TestRecord>(
            r#"
            SELECT id, date_time, subject, year, correct_answer, missed, wrong, elapsed_seconds
            FROM test_records
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let outcome = sqlx::query("DELETE FROM test_records WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(outcome.rows_affected() > 0)
    }
}
