// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    config::Config,
    error::AppError,
    models::user::{LoginRequest, SignupRequest, User},
    utils::{
        hash::{hash_password, verify_password},
        html::clean_text,
        jwt::sign_jwt,
    },
};

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it.
/// Returns 201 Created and the user object (excluding password).
pub async fn signup(
    State(pool): State<SqlitePool>,
    Json(payload): Json<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let name = clean_text(&payload.name);
    if name.is_empty() {
        return Err(AppError::BadRequest("Name cannot be empty.".to_string()));
    }

    let hashed_password = hash_password(&payload.password)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (name, roll_number, password)
        VALUES (?, ?, ?)
        RETURNING id, name, roll_number, password, created_at
        "#,
    )
    .bind(&name)
    .bind(&payload.roll_number)
    .bind(&hashed_password)
    .fetch_one(&pool)
    .await
    .map_err(|e| {
        let is_duplicate = e
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation());
        if is_duplicate {
            AppError::Conflict("Roll number already exists. Please Login.".to_string())
        } else {
            tracing::error!("Failed to register user: {:?}", e);
            AppError::from(e)
        }
    })?;

    tracing::info!("New user signed up with roll number {}", user.roll_number);

    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticates a user and returns a JWT token.
pub async fn login(
    State(pool): State<SqlitePool>,
    State(config): State<Config>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, roll_number, password, created_at
        FROM users
        WHERE roll_number = ?
        "#,
    )
    .bind(&payload.roll_number)
    .fetch_optional(&pool)
    .await
    .map_err(|e| {
        tracing::error!("Login DB error: {:?}", e);
        AppError::InternalServerError(e.to_string())
    })?;

    let invalid = || AppError::AuthError("Invalid roll number or password.".to_string());

    let user = user.ok_or_else(invalid)?;

    if !verify_password(&payload.password, &user.password)? {
        return Err(invalid());
    }

    let token = sign_jwt(
        user.id,
        &user.roll_number,
        &config.jwt_secret,
        config.jwt_expiration,
    )?;

    Ok(Json(json!({
        "token": token,
        "type": "Bearer",
        "name": user.name,
        "roll_number": user.roll_number
    })))
}
