// tests/common/mod.rs
#![allow(dead_code)]

use std::sync::Arc;

use paper_quiz::{
    config::Config,
    models::question::QuestionSeed,
    routes,
    state::AppState,
    store::{SqliteQuestionStore, SqliteResultStore, SystemClock, sqlite::connect},
};
use sqlx::SqlitePool;

pub struct TestApp {
    pub address: String,
    pub users_pool: SqlitePool,
    pub results_pool: SqlitePool,
    pub questions: SqliteQuestionStore,
}

async fn temp_pool(label: &str) -> SqlitePool {
    let path = std::env::temp_dir().join(format!(
        "paper_quiz_{}_{}.db",
        label,
        uuid::Uuid::new_v4()
    ));
    connect(&format!("sqlite://{}", path.display()))
        .await
        .expect("Failed to open test database")
}

pub fn test_config() -> Config {
    Config {
        users_database_url: String::new(),
        results_database_url: String::new(),
        questions_database_url: String::new(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        papers_dir: std::env::temp_dir().display().to_string(),
        public_base_url: None,
        questions_seed: None,
    }
}

/// Builds the state over fresh temporary databases.
pub async fn test_state() -> (AppState, TestApp) {
    let users_pool = temp_pool("users").await;
    let results_pool = temp_pool("results").await;
    let questions_pool = temp_pool("questions").await;

    sqlx::migrate!("./migrations/users")
        .run(&users_pool)
        .await
        .expect("Failed to migrate users database");
    sqlx::migrate!("./migrations/results")
        .run(&results_pool)
        .await
        .expect("Failed to migrate results database");
    sqlx::migrate!("./migrations/questions")
        .run(&questions_pool)
        .await
        .expect("Failed to migrate questions database");

    let questions = SqliteQuestionStore::new(questions_pool);
    let state = AppState::new(
        users_pool.clone(),
        questions.clone(),
        SqliteResultStore::new(results_pool.clone()),
        Arc::new(SystemClock),
        test_config(),
    );

    let app = TestApp {
        address: String::new(),
        users_pool,
        results_pool,
        questions,
    };
    (state, app)
}

/// Spawns the app on a random port for testing.
pub async fn spawn_app() -> TestApp {
    let (state, mut app) = test_state().await;
    let router = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    app.address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    app
}

/// Paper CHEM1001 2014 with correct options [1, 2, 1, 4].
pub fn chem_paper() -> Vec<QuestionSeed> {
    [1, 2, 1, 4]
        .iter()
        .enumerate()
        .map(|(i, c)| QuestionSeed {
            course_code: "CHEM1001".to_string(),
            year: "2014".to_string(),
            position: i as i64 + 1,
            question: format!("Question {}", i + 1),
            options: [
                format!("A{}", i),
                format!("B{}", i),
                format!("C{}", i),
                format!("D{}", i),
            ],
            c: *c,
        })
        .collect()
}

/// Signs up and logs in a fresh user, returning the bearer token.
pub async fn login_new_user(client: &reqwest::Client, address: &str) -> String {
    let roll_number = format!("r_{}", &uuid::Uuid::new_v4().to_string()[..8]);
    let password = "password1!";

    let signup = client
        .post(format!("{}/api/auth/signup", address))
        .json(&serde_json::json!({
            "name": "Test Student",
            "roll_number": roll_number,
            "password": password,
            "confirm_password": password
        }))
        .send()
        .await
        .expect("Signup failed");
    assert_eq!(signup.status().as_u16(), 201);

    let login = client
        .post(format!("{}/api/auth/login", address))
        .json(&serde_json::json!({
            "roll_number": roll_number,
            "password": password
        }))
        .send()
        .await
        .expect("Login failed")
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse login json");

    login["token"].as_str().expect("Token not found").to_string()
}
