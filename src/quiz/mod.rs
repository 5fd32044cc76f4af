// src/quiz/mod.rs

//! Quiz session state machine, scoring, and the finish → record → restart
//! completion flow.

pub mod scoring;
pub mod session;

use crate::{
    error::QuizError,
    store::{Clock, QuestionStore, ResultStore},
};

pub use scoring::{ScoringResult, Tally, score};
pub use session::{QuizSession, SessionState};

/// A recorded attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedAttempt {
    pub record_id: i64,
    pub result: ScoringResult,
    pub total_questions: usize,
}

/// Loads the paper and starts a session on it.
pub async fn start_session(
    questions: &dyn QuestionStore,
    clock: &dyn Clock,
    subject: &str,
    year: &str,
) -> Result<QuizSession, QuizError> {
    let set = questions.get_questions(subject, year).await.map_err(|e| {
        tracing::error!("Failed to load questions for {} {}: {}", subject, year, e);
        QuizError::PersistenceFailure(e.to_string())
    })?;

    let session = QuizSession::start(subject, year, set, clock.now())?;
    tracing::info!(
        "Quiz started on {} {} with {} questions",
        subject,
        year,
        session.question_count()
    );
    Ok(session)
}

/// Finishes the session, records the result and resets the session.
///
/// When the write fails the session stays finished with its scores cached;
/// calling this again retries the write with the same scores.
pub async fn complete_attempt(
    session: &mut QuizSession,
    results: &dyn ResultStore,
    clock: &dyn Clock,
) -> Result<CompletedAttempt, QuizError> {
    let result = session.finish(clock.now())?;

    let record_id = results.record(&result).await.map_err(|e| {
        tracing::error!(
            "Failed to record result for {} {}: {}",
            result.subject,
            result.year,
            e
        );
        QuizError::PersistenceFailure(e.to_string())
    })?;

    tracing::info!(
        "Recorded test {} for {} {}: {} correct, {} missed, {} wrong in {:.2}s",
        record_id,
        result.subject,
        result.year,
        result.tally.correct,
        result.tally.missed,
        result.tally.wrong,
        result.elapsed_seconds
    );

    let total_questions = session.question_count();
    session.restart(clock.now());

    Ok(CompletedAttempt {
        record_id,
        result,
        total_questions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::StoreError,
        models::{exam_record::TestRecord, question::Question},
    };
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    };

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    struct MemoryQuestions(Vec<Question>);

    #[async_trait]
    impl QuestionStore for MemoryQuestions {
        async fn get_questions(
            &self,
            subject: &str,
            year: &str,
        ) -> Result<Vec<Question>, StoreError> {
            Ok(self
                .0
                .iter()
                .filter(|q| q.subject == subject && q.year == year)
                .cloned()
                .collect())
        }
    }

    #[derive(Default)]
    struct MemoryResults {
        fail: AtomicBool,
        rows: Mutex<Vec<ScoringResult>>,
    }

    #[async_trait]
    impl ResultStore for MemoryResults {
        async fn record(&self, result: &ScoringResult) -> Result<i64, StoreError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
            }
            let mut rows = self.rows.lock().unwrap();
            rows.push(result.clone());
            Ok(rows.len() as i64)
        }

        async fn list(&self) -> Result<Vec<TestRecord>, StoreError> {
            Ok(Vec::new())
        }

        async fn delete(&self, _id: i64) -> Result<bool, StoreError> {
            Ok(false)
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 1, 9, 0, 0).unwrap()
    }

    fn paper() -> Vec<Question> {
        (0..3)
            .map(|i| Question {
                subject: "CHEM1001".into(),
                year: "2014".into(),
                position: i + 1,
                prompt: format!("Question {}", i + 1),
                options: ["w".into(), "x".into(), "y".into(), "z".into()],
                correct_option: 1,
            })
            .collect()
    }

    async fn session_at_last(store: &MemoryQuestions) -> QuizSession {
        let mut session = start_session(store, &FixedClock(t0()), "CHEM1001", "2014")
            .await
            .unwrap();
        session.select_answer(0, "w").unwrap();
        session.next().unwrap();
        session.next().unwrap();
        session.select_answer(2, "x").unwrap();
        session
    }

    #[tokio::test]
    async fn test_start_on_unknown_paper_fails() {
        let store = MemoryQuestions(paper());
        let err = start_session(&store, &FixedClock(t0()), "PHYS9999", "2099")
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::EmptyQuestionSet { .. }));
    }

    #[tokio::test]
    async fn test_complete_attempt_records_and_resets() {
        let store = MemoryQuestions(paper());
        let results = MemoryResults::default();
        let mut session = session_at_last(&store).await;

        let done = complete_attempt(
            &mut session,
            &results,
            &FixedClock(t0() + Duration::seconds(30)),
        )
        .await
        .unwrap();

        assert_eq!(done.record_id, 1);
        assert_eq!(done.total_questions, 3);
        assert_eq!(done.result.tally, Tally { correct: 1, missed: 1, wrong: 1 });
        assert_eq!(done.result.elapsed_seconds, 30.0);

        assert_eq!(session.current_index(), Some(0));
        assert!(session.answers().is_empty());
        assert_eq!(results.rows.lock().unwrap().len(), 1);

        // Recording leaves the question set as it was.
        let reloaded = store.get_questions("CHEM1001", "2014").await.unwrap();
        assert_eq!(reloaded, paper());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_scores_for_retry() {
        let store = MemoryQuestions(paper());
        let results = MemoryResults::default();
        results.fail.store(true, Ordering::SeqCst);
        let mut session = session_at_last(&store).await;

        let err = complete_attempt(
            &mut session,
            &results,
            &FixedClock(t0() + Duration::seconds(30)),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, QuizError::PersistenceFailure(_)));
        assert!(session.is_finished());
        assert_eq!(session.answers().len(), 2);

        results.fail.store(false, Ordering::SeqCst);
        let done = complete_attempt(
            &mut session,
            &results,
            &FixedClock(t0() + Duration::seconds(900)),
        )
        .await
        .unwrap();

        // Scores and elapsed time come from the first finish.
        assert_eq!(done.result.elapsed_seconds, 30.0);
        assert_eq!(done.result.tally, Tally { correct: 1, missed: 1, wrong: 1 });
        assert!(!session.is_finished());
    }

    #[tokio::test]
    async fn test_finish_before_last_question_records_nothing() {
        let store = MemoryQuestions(paper());
        let results = MemoryResults::default();
        let mut session = start_session(&store, &FixedClock(t0()), "CHEM1001", "2014")
            .await
            .unwrap();

        let err = complete_attempt(&mut session, &results, &FixedClock(t0()))
            .await
            .unwrap_err();
        assert!(matches!(err, QuizError::InvalidTransition(_)));
        assert!(results.rows.lock().unwrap().is_empty());
        assert_eq!(session.current_index(), Some(0));
    }
}
