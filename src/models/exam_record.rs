// src/models/exam_record.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Format of `test_records.date_time`.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Represents the 'test_records' table in the results store.
/// Rows are append-only; one per finished quiz session.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct TestRecord {
    pub id: i64,
    pub date_time: String,
    pub subject: String,
    pub year: String,
    pub correct_answer: i64,
    pub missed: i64,
    pub wrong: i64,
    pub elapsed_seconds: f64,
}

/// DTO for submitting the selected option of one question.
#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub index: usize,
    pub option: String,
}

/// DTO for starting a quiz on a subject/year paper.
#[derive(Debug, Deserialize)]
pub struct StartQuizRequest {
    pub subject: String,
    pub year: String,
}

/// Summary returned after a quiz has been scored and recorded.
#[derive(Debug, Serialize)]
pub struct FinishResponse {
    pub record_id: i64,
    pub subject: String,
    pub year: String,
    pub correct: u32,
    pub missed: u32,
    pub wrong: u32,
    pub total_questions: u32,
    pub elapsed_seconds: f64,
    pub message: String,

    /// Bucket/count pairs in chart order.
    pub chart: Vec<ChartBar>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ChartBar {
    pub result: &'static str,
    pub count: u32,
}

/// Mean bucket counts for one subject.
#[derive(Debug, Serialize, PartialEq, FromRow)]
pub struct SubjectAverage {
    pub subject: String,
    pub attempts: i64,
    pub correct_answer: f64,
    pub missed: f64,
    pub wrong: f64,
}

/// Bucket sums for a single timestamp.
#[derive(Debug, Serialize, PartialEq, FromRow)]
pub struct PerformancePoint {
    pub date_time: String,
    pub correct_answer: i64,
    pub missed: i64,
    pub wrong: i64,
}

#[derive(Debug, Serialize, PartialEq, FromRow)]
pub struct SubjectCount {
    pub subject: String,
    pub attempts: i64,
}

#[derive(Debug, Serialize, PartialEq, Default)]
pub struct PerformanceTotals {
    pub correct_answer: i64,
    pub missed: i64,
    pub wrong: i64,
}

/// Aggregated score analysis over every recorded test.
#[derive(Debug, Serialize)]
pub struct ScoreAnalysis {
    pub subject_distribution: Vec<SubjectCount>,
    pub performance_over_time: Vec<PerformancePoint>,
    pub subject_averages: Vec<SubjectAverage>,
    pub totals: PerformanceTotals,
}

/// Dashboard overview counters.
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub student_count: i64,
    pub upcoming_test_count: usize,
    pub upcoming_tests: Vec<UpcomingTest>,
}

#[derive(Debug, Serialize, FromRow)]
pub struct UpcomingTest {
    pub subject: String,
    pub year: String,
    pub date_time: String,
}
