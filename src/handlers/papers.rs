// src/handlers/papers.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use url::Url;

use crate::{
    config::Config,
    models::paper::{PaperListParams, list_papers},
};

/// Lists past papers grouped by subject, optionally filtered by year and subject.
pub async fn list_past_papers(
    State(config): State<Config>,
    Query(params): Query<PaperListParams>,
) -> impl IntoResponse {
    let base = config
        .public_base_url
        .as_deref()
        .and_then(|raw| match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!("Ignoring invalid PUBLIC_BASE_URL {}: {}", raw, e);
                None
            }
        });

    Json(list_papers(&params, base.as_ref()))
}
