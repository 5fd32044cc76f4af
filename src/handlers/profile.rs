use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde_json::json;
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{ChangePasswordRequest, MeResponse, User},
    utils::{hash::hash_password, jwt::Claims},
};

/// Get current user's profile.
pub async fn get_me(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, name, roll_number, password, created_at
        FROM users
        WHERE id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(&pool)
    .await?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(Json(MeResponse::from(user)))
}

/// Change the current user's password.
pub async fn change_password(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let user_id = claims.user_id()?;
    let hashed_password = hash_password(&payload.new_password)?;

    let outcome = sqlx::query("UPDATE users SET password = ? WHERE id = ?")
        .bind(&hashed_password)
        .bind(user_id)
        .execute(&pool)
        .await?;

    if outcome.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    tracing::info!("User {} changed password", user_id);

    Ok(Json(json!({ "message": "Password updated successfully!" })))
}
