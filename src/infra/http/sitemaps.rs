//! The public sitemap router.
//!
//! Fixed virtual paths map straight to service targets; per-kind documents
//! (`/sitemap-{slug}.xml`) are recognized in the fallback because the slug
//! sits inside one path segment. Anything unrecognized, and any kind whose
//! inclusion flag is off, fails closed as a bodyless 404.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, StatusCode, header::CONTENT_TYPE},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use bytes::Bytes;

use crate::{
    application::{
        error::ErrorReport,
        sitemap::{SitemapService, SitemapTarget},
    },
    domain::sitemap::find_by_slug,
    presentation::stylesheet::SITEMAP_STYLESHEET,
};

use super::middleware::{log_responses, set_request_context};

const X_ROBOTS_TAG: &str = "x-robots-tag";

#[derive(Clone)]
pub struct PublicState {
    pub sitemaps: Arc<SitemapService>,
}

pub fn build_public_router(state: PublicState) -> Router {
    Router::new()
        .route("/sitemap.xml", get(sitemap_index))
        .route("/sitemap.xsl", get(stylesheet))
        .route("/news-sitemap.xml", get(news_sitemap))
        .route("/video-sitemap.xml", get(video_sitemap))
        .route("/robots.txt", get(robots_txt))
        .fallback(kind_sitemap)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn sitemap_index(State(state): State<PublicState>) -> Response {
    serve_target(&state, SitemapTarget::Index, "sitemap index is disabled").await
}

async fn news_sitemap(State(state): State<PublicState>) -> Response {
    serve_target(&state, SitemapTarget::News, "news sitemap is disabled").await
}

async fn video_sitemap(State(state): State<PublicState>) -> Response {
    serve_target(&state, SitemapTarget::Video, "video sitemap is disabled").await
}

/// `/sitemap-{slug}.xml` for registered kinds; everything else is 404.
async fn kind_sitemap(State(state): State<PublicState>, request: Request<Body>) -> Response {
    let path = request.uri().path().trim_start_matches('/');

    let slug = path
        .strip_prefix("sitemap-")
        .and_then(|rest| rest.strip_suffix(".xml"));

    match slug.and_then(find_by_slug) {
        Some(desc) => {
            serve_target(
                &state,
                SitemapTarget::Kind(desc.kind),
                "sitemap kind is disabled",
            )
            .await
        }
        None => not_found("infra::http::sitemaps::kind_sitemap", "unknown sitemap path"),
    }
}

async fn serve_target(
    state: &PublicState,
    target: SitemapTarget,
    disabled_detail: &'static str,
) -> Response {
    match state.sitemaps.document(target).await {
        Some(body) => xml_response(body),
        None => not_found("infra::http::sitemaps::serve_target", disabled_detail),
    }
}

async fn stylesheet() -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/xsl; charset=utf-8")
        .header(X_ROBOTS_TAG, "noindex")
        .body(Body::from(SITEMAP_STYLESHEET))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

async fn robots_txt(State(state): State<PublicState>) -> Response {
    let body = state.sitemaps.robots_txt().await;
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Body::from(body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn xml_response(body: Bytes) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/xml; charset=utf-8")
        .header(X_ROBOTS_TAG, "noindex")
        .body(Body::from(body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}

fn not_found(source: &'static str, detail: &'static str) -> Response {
    let mut response = StatusCode::NOT_FOUND.into_response();
    ErrorReport::from_message(source, StatusCode::NOT_FOUND, detail).attach(&mut response);
    response
}
