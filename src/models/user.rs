// src/models/user.rs

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::config::PASSWORD_SPECIAL_CHARS;

static HAS_DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").unwrap());

static HAS_SPECIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("[{}]", regex::escape(PASSWORD_SPECIAL_CHARS))).unwrap()
});

/// Represents the 'users' table in the users store.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Unique login identifier.
    pub roll_number: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub created_at: Option<String>,
}

/// Profile data for the current user.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub name: String,
    pub roll_number: String,
    pub created_at: Option<String>,
}

impl From<User> for MeResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            roll_number: user.roll_number,
            created_at: user.created_at,
        }
    }
}

/// DTO for creating a new user (Signup).
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = validate_passwords_match))]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 100, message = "Name cannot be empty."))]
    pub name: String,
    #[validate(length(
        min = 1,
        max = 50,
        message = "Roll number length must be between 1 and 50 characters."
    ))]
    pub roll_number: String,
    #[validate(
        length(max = 128),
        custom(function = validate_password_strength)
    )]
    pub password: String,
    pub confirm_password: String,
}

/// DTO for user login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50))]
    pub roll_number: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// DTO for changing the current user's password.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(
        length(min = 1, max = 128, message = "Password cannot be empty."),
        custom(function = validate_password_strength)
    )]
    pub new_password: String,
}

/// A password needs at least one digit and one special character.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if HAS_DIGIT.is_match(password) && HAS_SPECIAL.is_match(password) {
        return Ok(());
    }
    let mut err = ValidationError::new("weak_password");
    err.message = Some(
        "Password must contain at least 1 number and 1 special character.".into(),
    );
    Err(err)
}

fn validate_passwords_match(req: &SignupRequest) -> Result<(), ValidationError> {
    if req.password != req.confirm_password {
        let mut err = ValidationError::new("password_mismatch");
        err.message = Some("Passwords do not match.".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(password: &str, confirm: &str) -> SignupRequest {
        SignupRequest {
            name: "Asha".into(),
            roll_number: "R001".into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn test_password_rule() {
        assert!(validate_password_strength("pass1!").is_ok());
        assert!(validate_password_strength("a_9").is_ok());
        assert!(validate_password_strength("password").is_err());
        assert!(validate_password_strength("password1").is_err());
        assert!(validate_password_strength("password!").is_err());
        // '-' is not in the accepted set
        assert!(validate_password_strength("pass-1").is_err());
    }

    #[test]
    fn test_signup_validation() {
        assert!(signup("secret1!", "secret1!").validate().is_ok());
        assert!(signup("secret1!", "secret2!").validate().is_err());
        assert!(signup("secret", "secret").validate().is_err());
    }
}
