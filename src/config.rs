// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Token lifetime used when `JWT_EXPIRATION` is not set.
pub const DEFAULT_JWT_EXPIRATION_SECS: u64 = 24 * 60 * 60;

/// Characters accepted as the "special" character of a password.
pub const PASSWORD_SPECIAL_CHARS: &str = "!@#$%^&*()_+";

#[derive(Debug, Clone)]
pub struct Config {
    pub users_database_url: String,
    pub results_database_url: String,
    pub questions_database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub rust_log: String,
    pub bind_addr: String,
    pub papers_dir: String,
    pub public_base_url: Option<String>,
    pub questions_seed: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let users_database_url = env::var("USERS_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://database.db?mode=rwc".to_string());

        let results_database_url = env::var("RESULTS_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://test.db?mode=rwc".to_string());

        let questions_database_url = env::var("QUESTIONS_DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://question.db?mode=rwc".to_string());

        let jwt_secret = env::var("JWT_SECRET")
            .expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_JWT_EXPIRATION_SECS);

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let papers_dir = env::var("PAPERS_DIR")
            .unwrap_or_else(|_| "pyq".to_string());

        Self {
            users_database_url,
            results_database_url,
            questions_database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            bind_addr,
            papers_dir,
            public_base_url: env::var("PUBLIC_BASE_URL").ok(),
            questions_seed: env::var("QUESTIONS_SEED").ok(),
        }
    }
}
