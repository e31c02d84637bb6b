//! Cache configuration.
//!
//! TTLs mirror how quickly each document class goes stale: news churns in
//! minutes, taxonomy listings in hours.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::sitemap::{SitemapSource, descriptor};

use super::keys::DocumentKey;

const DEFAULT_INDEX_TTL_SECS: u64 = 60 * 60;
const DEFAULT_NEWS_TTL_SECS: u64 = 30 * 60;
const DEFAULT_VIDEO_TTL_SECS: u64 = 60 * 60;
const DEFAULT_CONTENT_TTL_SECS: u64 = 6 * 60 * 60;
const DEFAULT_TAXONOMY_TTL_SECS: u64 = 12 * 60 * 60;

/// Cache configuration from `sentiero.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Disabling the cache regenerates every document on every request.
    pub enabled: bool,
    /// TTL for the sitemap index document.
    pub index_ttl_secs: u64,
    /// TTL for the news sitemap.
    pub news_ttl_secs: u64,
    /// TTL for the video sitemap.
    pub video_ttl_secs: u64,
    /// TTL for content-backed kind documents (homepage, posts, pages, products).
    pub content_ttl_secs: u64,
    /// TTL for taxonomy-backed kind documents.
    pub taxonomy_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            index_ttl_secs: DEFAULT_INDEX_TTL_SECS,
            news_ttl_secs: DEFAULT_NEWS_TTL_SECS,
            video_ttl_secs: DEFAULT_VIDEO_TTL_SECS,
            content_ttl_secs: DEFAULT_CONTENT_TTL_SECS,
            taxonomy_ttl_secs: DEFAULT_TAXONOMY_TTL_SECS,
        }
    }
}

impl CacheConfig {
    /// TTL for one document key.
    pub fn ttl_for(&self, key: DocumentKey) -> Duration {
        let secs = match key {
            DocumentKey::Index => self.index_ttl_secs,
            DocumentKey::News => self.news_ttl_secs,
            DocumentKey::Video => self.video_ttl_secs,
            DocumentKey::Kind(kind) => match descriptor(kind).source {
                SitemapSource::Homepage | SitemapSource::Content(_) => self.content_ttl_secs,
                SitemapSource::Taxonomy(_) => self.taxonomy_ttl_secs,
            },
        };
        Duration::from_secs(secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sitemap::SitemapKind;

    #[test]
    fn default_ttls_follow_document_class() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl_for(DocumentKey::News), Duration::from_secs(1800));
        assert_eq!(config.ttl_for(DocumentKey::Index), Duration::from_secs(3600));
        assert_eq!(config.ttl_for(DocumentKey::Video), Duration::from_secs(3600));
        assert_eq!(
            config.ttl_for(DocumentKey::Kind(SitemapKind::Post)),
            Duration::from_secs(6 * 3600)
        );
        assert_eq!(
            config.ttl_for(DocumentKey::Kind(SitemapKind::ProductCategory)),
            Duration::from_secs(12 * 3600)
        );
    }
}
