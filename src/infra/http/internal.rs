//! Internal maintenance router: health probing and the cache purge hook the
//! platform calls on content save/delete.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{error, info};

use crate::{application::error::HttpError, cache::DocumentStore, infra::db::PostgresRepositories};

use super::middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct InternalState {
    pub db: Arc<PostgresRepositories>,
    pub cache: Arc<DocumentStore>,
}

pub fn build_internal_router(state: InternalState) -> Router {
    Router::new()
        .route("/_health/db", get(db_health))
        .route("/cache/purge", post(purge_cache))
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn db_health(State(state): State<InternalState>) -> Response {
    match state.db.health_check().await {
        Ok(()) => (StatusCode::OK, "ok").into_response(),
        Err(err) => {
            error!(
                target = "sentiero::http::health",
                error = %err,
                "database health check failed"
            );
            HttpError::from_error(
                "infra::http::internal::db_health",
                StatusCode::SERVICE_UNAVAILABLE,
                "Database unavailable",
                &err,
            )
            .into_response()
        }
    }
}

/// Coarse invalidation: any content save or delete in the platform clears
/// every cached sitemap document.
async fn purge_cache(State(state): State<InternalState>) -> StatusCode {
    state.cache.invalidate_all();
    info!(
        target = "sentiero::http::purge",
        "sitemap cache purged on content mutation"
    );
    StatusCode::NO_CONTENT
}
