//! Document cache behavior: idempotence within the TTL, coarse
//! invalidation on content mutation, and cache bypass when disabled.

mod common;

use std::time::Duration;

use bytes::Bytes;
use common::*;
use metrics_util::debugging::DebuggingRecorder;
use sentiero::application::sitemap::SitemapTarget;
use sentiero::cache::{CacheConfig, DocumentKey, DocumentStore};
use sentiero::domain::sitemap::SitemapKind;
use sentiero::domain::types::ContentType;

#[tokio::test]
async fn repeated_generation_within_ttl_is_byte_identical() {
    let platform = TestPlatform::new();
    platform
        .content
        .push(published_item(ContentType::Page, "about", "About"));

    let first = platform
        .service
        .document(SitemapTarget::Kind(SitemapKind::Page))
        .await
        .expect("page sitemap");
    let second = platform
        .service
        .document(SitemapTarget::Kind(SitemapKind::Page))
        .await
        .expect("page sitemap");

    assert_eq!(first, second);
}

#[tokio::test]
async fn cached_document_survives_content_mutation_until_purge() {
    let platform = TestPlatform::new();
    platform
        .content
        .push(published_item(ContentType::Page, "about", "About"));

    let before = platform
        .service
        .document(SitemapTarget::Kind(SitemapKind::Page))
        .await
        .expect("page sitemap");

    platform
        .content
        .push(published_item(ContentType::Page, "team", "Team"));

    // Mutation without a purge: the stale cached document is still served.
    let stale = platform
        .service
        .document(SitemapTarget::Kind(SitemapKind::Page))
        .await
        .expect("page sitemap");
    assert_eq!(before, stale);

    platform.cache.invalidate_all();

    let fresh = platform
        .service
        .document(SitemapTarget::Kind(SitemapKind::Page))
        .await
        .expect("page sitemap");
    let xml = body_string(fresh);
    assert!(xml.contains("/about/"));
    assert!(xml.contains("/team/"));
}

#[tokio::test]
async fn purge_clears_every_document_kind() {
    let platform = TestPlatform::new();
    platform
        .content
        .push(published_item(ContentType::Post, "first", "First"));

    for target in [
        SitemapTarget::Index,
        SitemapTarget::Kind(SitemapKind::Post),
        SitemapTarget::Kind(SitemapKind::Homepage),
    ] {
        assert!(platform.service.document(target).await.is_some());
    }
    assert_eq!(platform.cache.len(), 3);

    platform.cache.invalidate_all();

    assert!(platform.cache.is_empty());
}

#[test]
fn cache_counters_track_hits_misses_and_purges() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();

    metrics::with_local_recorder(&recorder, || {
        let store = DocumentStore::new(&CacheConfig::default());
        assert!(store.get(DocumentKey::Index).is_none());
        store.put(
            DocumentKey::Index,
            Bytes::from_static(b"<sitemapindex/>"),
            Duration::from_secs(60),
        );
        assert!(store.get(DocumentKey::Index).is_some());
        store.invalidate_all();
    });

    let names: Vec<String> = snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .map(|(key, _, _, _)| key.key().name().to_string())
        .collect();

    for expected in [
        "sentiero_sitemap_cache_miss_total",
        "sentiero_sitemap_cache_store_total",
        "sentiero_sitemap_cache_hit_total",
        "sentiero_sitemap_cache_purge_total",
    ] {
        assert!(names.iter().any(|name| name == expected), "missing {expected}");
    }
}

#[tokio::test]
async fn disabled_cache_regenerates_from_current_content() {
    let cache_config = CacheConfig {
        enabled: false,
        ..CacheConfig::default()
    };
    let platform = TestPlatform::with_cache_config(cache_config);
    platform
        .content
        .push(published_item(ContentType::Page, "about", "About"));

    let before = platform
        .service
        .document(SitemapTarget::Kind(SitemapKind::Page))
        .await
        .expect("page sitemap");
    assert!(body_string(before).contains("/about/"));

    platform
        .content
        .push(published_item(ContentType::Page, "team", "Team"));

    let after = platform
        .service
        .document(SitemapTarget::Kind(SitemapKind::Page))
        .await
        .expect("page sitemap");
    assert!(body_string(after).contains("/team/"));
    assert!(platform.cache.is_empty());
}
