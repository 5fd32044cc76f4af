// src/handlers/quiz.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::{
    error::{AppError, QuizError},
    models::{
        exam_record::{ChartBar, FinishResponse, StartQuizRequest, SubmitAnswerRequest},
        question::QuestionView,
    },
    quiz::{self, CompletedAttempt, QuizSession},
    state::AppState,
    utils::jwt::Claims,
};

fn no_session() -> AppError {
    AppError::NotFound("No quiz in progress. Start one first.".to_string())
}

fn current_view(session: &QuizSession) -> Result<Json<QuestionView>, AppError> {
    session.view().map(Json).ok_or_else(|| {
        AppError::Conflict("Quiz is finished; retry finish to record the result.".to_string())
    })
}

/// Starts (or restarts) a quiz on a subject/year paper for the current user.
///
/// An unknown paper yields 404 and leaves any existing session alone.
pub async fn start_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<StartQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    let session =
        quiz::start_session(&state.questions, state.clock.as_ref(), &req.subject, &req.year)
            .await?;

    let view = current_view(&session)?;
    state.sessions.lock().await.insert(user_id, session);
    Ok(view)
}

/// Returns the current question with any previously selected option.
pub async fn current_question(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let sessions = state.sessions.lock().await;
    let session = sessions.get(&user_id).ok_or_else(no_session)?;
    current_view(session)
}

/// Records the selected option for the current question.
pub async fn submit_answer(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(&user_id).ok_or_else(no_session)?;

    session.select_answer(req.index, &req.option).inspect_err(|e| {
        tracing::debug!("User {} answer rejected: {}", user_id, e);
    })?;

    current_view(session)
}

/// Moves to the next question.
pub async fn next_question(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    navigate(state, claims, QuizSession::next).await
}

/// Moves back to the previous question.
pub async fn previous_question(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    navigate(state, claims, QuizSession::previous).await
}

async fn navigate(
    state: AppState,
    claims: Claims,
    step: fn(&mut QuizSession) -> Result<usize, QuizError>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(&user_id).ok_or_else(no_session)?;

    step(session).inspect_err(|e| {
        tracing::debug!("User {} navigation rejected: {}", user_id, e);
    })?;

    current_view(session)
}

/// Scores the attempt, records it and resets the session.
///
/// Only allowed on the last question. The registry lock is held across the
/// write so scoring and recording happen as one step per user.
pub async fn finish_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let mut sessions = state.sessions.lock().await;
    let session = sessions.get_mut(&user_id).ok_or_else(no_session)?;

    let attempt = quiz::complete_attempt(session, &state.results, state.clock.as_ref()).await?;

    Ok(Json(finish_response(attempt)))
}

/// Abandons the current user's session, if any.
pub async fn abandon_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let removed = state.sessions.lock().await.remove(&user_id).is_some();
    Ok(Json(json!({ "abandoned": removed })))
}

fn finish_response(attempt: CompletedAttempt) -> FinishResponse {
    let CompletedAttempt {
        record_id,
        result,
        total_questions,
    } = attempt;
    let tally = result.tally;

    FinishResponse {
        record_id,
        subject: result.subject,
        year: result.year,
        correct: tally.correct,
        missed: tally.missed,
        wrong: tally.wrong,
        total_questions: total_questions as u32,
        elapsed_seconds: result.elapsed_seconds,
        message: format!(
            "You answered {} out of {} questions correctly!",
            tally.correct, total_questions
        ),
        chart: vec![
            ChartBar { result: "Correct", count: tally.correct },
            ChartBar { result: "Missed", count: tally.missed },
            ChartBar { result: "Wrong", count: tally.wrong },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{ScoringResult, Tally};
    use chrono::Utc;

    #[test]
    fn test_finish_response_chart_order() {
        let response = finish_response(CompletedAttempt {
            record_id: 7,
            result: ScoringResult {
                subject: "CHEM1001".into(),
                year: "2014".into(),
                tally: Tally { correct: 2, missed: 1, wrong: 1 },
                elapsed_seconds: 12.5,
                created_at: Utc::now(),
            },
            total_questions: 4,
        });

        assert_eq!(response.message, "You answered 2 out of 4 questions correctly!");
        let labels: Vec<&str> = response.chart.iter().map(|b| b.result).collect();
        assert_eq!(labels, vec!["Correct", "Missed", "Wrong"]);
        assert_eq!(response.chart[1].count, 1);
    }
}
