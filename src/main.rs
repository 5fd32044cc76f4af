// src/main.rs

use std::{net::SocketAddr, sync::Arc};

use dotenvy::dotenv;
use paper_quiz::{
    config::Config,
    models::question::QuestionSeed,
    routes,
    state::AppState,
    store::{SqliteQuestionStore, SqliteResultStore, SystemClock, sqlite::connect},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // One pool per store
    let users_pool = connect(&config.users_database_url)
        .await
        .expect("Failed to open users database");
    let results_pool = connect(&config.results_database_url)
        .await
        .expect("Failed to open results database");
    let questions_pool = connect(&config.questions_database_url)
        .await
        .expect("Failed to open questions database");

    tracing::info!("Databases connected...");

    // Run Migrations Automatically
    tracing::info!("Running migrations...");
    sqlx::migrate!("./migrations/users")
        .run(&users_pool)
        .await
        .expect("Failed to run users migrations");
    sqlx::migrate!("./migrations/results")
        .run(&results_pool)
        .await
        .expect("Failed to run results migrations");
    sqlx::migrate!("./migrations/questions")
        .run(&questions_pool)
        .await
        .expect("Failed to run questions migrations");
    tracing::info!("Migrations applied successfully.");

    let questions = SqliteQuestionStore::new(questions_pool);

    // Seed Questions
    if let Err(e) = seed_questions(&questions, &config).await {
        tracing::error!("Failed to seed questions: {:?}", e);
    }

    // Create AppState
    let state = AppState::new(
        users_pool,
        questions,
        SqliteResultStore::new(results_pool),
        Arc::new(SystemClock),
        config.clone(),
    );

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .expect("BIND_ADDR must be a socket address");
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}

async fn seed_questions(
    store: &SqliteQuestionStore,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = &config.questions_seed {
        let raw = tokio::fs::read_to_string(path).await?;
        let seeds: Vec<QuestionSeed> = serde_json::from_str(&raw)?;
        let inserted = store.seed_if_empty(&seeds).await?;
        if inserted > 0 {
            tracing::info!("Seeded {} questions from {}", inserted, path);
        } else {
            tracing::info!("Questions store already populated; skipping seed.");
        }
    }
    Ok(())
}
