// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{auth, papers, profile, quiz, results},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (auth, profile, papers, quiz, results).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (stores, sessions, config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let auth_layer = middleware::from_fn_with_state(state.clone(), auth_middleware);

    let auth_routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login));

    let profile_routes = Router::new()
        .route("/me", get(profile::get_me))
        .route("/password", put(profile::change_password))
        .layer(auth_layer.clone());

    let quiz_routes = Router::new()
        .route("/start", post(quiz::start_quiz))
        .route("/current", get(quiz::current_question))
        .route("/answer", post(quiz::submit_answer))
        .route("/next", post(quiz::next_question))
        .route("/previous", post(quiz::previous_question))
        .route("/finish", post(quiz::finish_quiz))
        .route("/", delete(quiz::abandon_quiz))
        .layer(auth_layer.clone());

    let results_routes = Router::new()
        .route("/", get(results::list_results))
        .route("/analysis", get(results::score_analysis))
        .route("/{id}", delete(results::delete_result))
        .layer(auth_layer.clone());

    let overview_routes = Router::new()
        .route("/", get(results::overview))
        .layer(auth_layer);

    let papers_dir = ServeDir::new(&state.config.papers_dir);

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/profile", profile_routes)
        .nest("/api/quiz", quiz_routes)
        .nest("/api/results", results_routes)
        .nest("/api/overview", overview_routes)
        .route("/api/papers", get(papers::list_past_papers))
        .nest_service("/pyq", papers_dir)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
