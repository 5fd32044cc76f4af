// src/handlers/results.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::exam_record::OverviewResponse,
    state::AppState,
    store::{ResultStore, SqliteResultStore},
};

/// Lists every recorded test, newest first.
pub async fn list_results(
    State(results): State<SqliteResultStore>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(results.list().await?))
}

/// Deletes one recorded test.
pub async fn delete_result(
    State(results): State<SqliteResultStore>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !results.delete(id).await? {
        return Err(AppError::NotFound(format!("Test record {} not found", id)));
    }
    tracing::info!("Deleted test record {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Score analysis: subject distribution, performance over time, per-subject
/// averages and overall totals.
pub async fn score_analysis(
    State(results): State<SqliteResultStore>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(results.analysis().await?))
}

/// Dashboard overview: enrolled students and tests dated in the future.
pub async fn overview(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let student_count = student_count(&state.pool).await?;
    let upcoming_tests = state.results.upcoming(state.clock.now()).await?;

    Ok(Json(OverviewResponse {
        student_count,
        upcoming_test_count: upcoming_tests.len(),
        upcoming_tests,
    }))
}

async fn student_count(pool: &SqlitePool) -> Result<i64, AppError> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count users: {:?}", e);
            AppError::from(e)
        })?;
    Ok(count)
}
