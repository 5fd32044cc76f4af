use std::{collections::HashMap, sync::Arc};

use crate::{
    config::Config,
    quiz::QuizSession,
    store::{Clock, SqliteQuestionStore, SqliteResultStore},
};
use axum::extract::FromRef;
use sqlx::SqlitePool;
use tokio::sync::Mutex;

/// Live quiz sessions keyed by user id. One session per user.
pub type SessionRegistry = Arc<Mutex<HashMap<i64, QuizSession>>>;

#[derive(Clone)]
pub struct AppState {
    /// Users store.
    pub pool: SqlitePool,
    pub questions: SqliteQuestionStore,
    pub results: SqliteResultStore,
    pub sessions: SessionRegistry,
    pub clock: Arc<dyn Clock>,
    pub config: Config,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        questions: SqliteQuestionStore,
        results: SqliteResultStore,
        clock: Arc<dyn Clock>,
        config: Config,
    ) -> Self {
        Self {
            pool,
            questions,
            results,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            clock,
            config,
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for SqliteResultStore {
    fn from_ref(state: &AppState) -> Self {
        state.results.clone()
    }
}
