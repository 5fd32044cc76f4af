// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 500 Internal Server Error
    InternalServerError(String),

    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    AuthError(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict (e.g., duplicate roll number, navigation out of turn)
    Conflict(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::AuthError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };
        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError::InternalServerError`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Errors raised by the question and result stores.
#[derive(Debug)]
pub enum StoreError {
    /// The underlying database call failed.
    Database(sqlx::Error),

    /// A row was read but does not describe a valid record.
    MalformedRow(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Database(e) => write!(f, "database error: {}", e),
            StoreError::MalformedRow(msg) => write!(f, "malformed row: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(e) => Some(e),
            StoreError::MalformedRow(_) => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

/// Failures of the quiz session and its completion flow.
///
/// Every variant leaves the session exactly as it was before the call.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizError {
    /// Navigation or finish requested from a state that does not allow it.
    InvalidTransition(String),

    /// The selected text is not one of the question's four options.
    InvalidAnswer(String),

    /// The question store has nothing for this subject/year.
    EmptyQuestionSet { subject: String, year: String },

    /// The result could not be written; the scores stay cached on the session.
    PersistenceFailure(String),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::InvalidTransition(msg) => write!(f, "invalid transition: {}", msg),
            QuizError::InvalidAnswer(msg) => write!(f, "invalid answer: {}", msg),
            QuizError::EmptyQuestionSet { subject, year } => write!(
                f,
                "no questions found for paper {} ({})",
                subject, year
            ),
            QuizError::PersistenceFailure(msg) => write!(f, "failed to record result: {}", msg),
        }
    }
}

impl std::error::Error for QuizError {}

impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::InvalidTransition(_) => AppError::Conflict(err.to_string()),
            QuizError::InvalidAnswer(_) => AppError::BadRequest(err.to_string()),
            QuizError::EmptyQuestionSet { .. } => AppError::NotFound(err.to_string()),
            QuizError::PersistenceFailure(_) => AppError::InternalServerError(err.to_string()),
        }
    }
}
