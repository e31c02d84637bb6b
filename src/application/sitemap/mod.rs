//! Sitemap generation service.
//!
//! One service owns the whole document family. A request resolves to a
//! [`SitemapTarget`]; the service checks the inclusion or feature flag,
//! consults the document cache, and on a miss runs the matching generator
//! and stores the result under the target's TTL. Settings are loaded once
//! per generation pass and threaded through the generators; a failed
//! settings load degrades to built-in defaults so the surface stays
//! best-effort rather than erroring.

mod news;
mod standard;
mod video;
pub mod writer;

use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use metrics::histogram;
use time::OffsetDateTime;
use tracing::warn;

use crate::application::repos::{ContentRepo, SettingsRepo, TermsRepo};
use crate::application::robots::RobotsResolver;
use crate::cache::{CacheConfig, DocumentKey, DocumentStore};
use crate::domain::entities::{ContentRecord, SeoSettingsRecord, TermRecord};
use crate::domain::sitemap::{
    IndexEntry, REGISTRY, SitemapKind, SitemapSource, descriptor,
};
use crate::domain::types::{ContentType, Taxonomy};

use writer::Extensions;

const SOURCE: &str = "application::sitemap";

/// Path of the stylesheet document relative to the site root.
pub const STYLESHEET_PATH: &str = "/sitemap.xsl";

/// One requested sitemap document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapTarget {
    Index,
    Kind(SitemapKind),
    News,
    Video,
}

impl SitemapTarget {
    fn cache_key(self) -> DocumentKey {
        match self {
            SitemapTarget::Index => DocumentKey::Index,
            SitemapTarget::Kind(kind) => DocumentKey::Kind(kind),
            SitemapTarget::News => DocumentKey::News,
            SitemapTarget::Video => DocumentKey::Video,
        }
    }
}

/// Service generating and caching the sitemap document family.
#[derive(Clone)]
pub struct SitemapService {
    content: Arc<dyn ContentRepo>,
    terms: Arc<dyn TermsRepo>,
    settings: Arc<dyn SettingsRepo>,
    cache: Arc<DocumentStore>,
    cache_config: CacheConfig,
}

impl SitemapService {
    pub fn new(
        content: Arc<dyn ContentRepo>,
        terms: Arc<dyn TermsRepo>,
        settings: Arc<dyn SettingsRepo>,
        cache: Arc<DocumentStore>,
        cache_config: CacheConfig,
    ) -> Self {
        Self {
            content,
            terms,
            settings,
            cache,
            cache_config,
        }
    }

    /// Produce the serialized document for a target, or `None` when the
    /// target is disabled by settings (the router turns that into a 404).
    pub async fn document(&self, target: SitemapTarget) -> Option<Bytes> {
        let settings = self.load_settings().await;
        if !target_enabled(&settings, target) {
            return None;
        }

        let key = target.cache_key();
        if let Some(cached) = self.cache.get(key) {
            return Some(cached);
        }

        let started = Instant::now();
        let xml = self.generate(target, &settings).await;
        histogram!("sentiero_sitemap_generate_ms", "document" => key.label())
            .record(started.elapsed().as_secs_f64() * 1000.0);

        let body = Bytes::from(xml);
        self.cache
            .put(key, body.clone(), self.cache_config.ttl_for(key));
        Some(body)
    }

    /// The plain-text robots policy advertising the enabled sitemap set.
    pub async fn robots_txt(&self) -> String {
        let settings = self.load_settings().await;
        let base = site_base(&settings);

        let mut body = format!("User-agent: *\nAllow: /\nSitemap: {base}/sitemap.xml\n");
        if settings.news.enabled {
            body.push_str(&format!("Sitemap: {base}/news-sitemap.xml\n"));
        }
        if settings.video_sitemap_enabled {
            body.push_str(&format!("Sitemap: {base}/video-sitemap.xml\n"));
        }
        body
    }

    async fn load_settings(&self) -> SeoSettingsRecord {
        match self.settings.load_seo_settings().await {
            Ok(settings) => settings,
            Err(err) => {
                warn!(
                    target = SOURCE,
                    error = %err,
                    "settings load failed; generating with built-in defaults"
                );
                SeoSettingsRecord::default()
            }
        }
    }

    async fn generate(&self, target: SitemapTarget, settings: &SeoSettingsRecord) -> String {
        let base = site_base(settings);
        let stylesheet = format!("{base}{STYLESHEET_PATH}");
        let resolver = RobotsResolver::new(settings.robots.clone());
        let now = OffsetDateTime::now_utc();

        match target {
            SitemapTarget::Index => {
                writer::render_index(&index_entries(settings, &base, now), &stylesheet)
            }
            SitemapTarget::Kind(kind) => {
                let desc = descriptor(kind);
                let entries = match desc.source {
                    SitemapSource::Homepage => {
                        standard::homepage_entries(settings, &base, now.date())
                    }
                    SitemapSource::Content(content_type) => {
                        standard::content_entries(
                            self.content.as_ref(),
                            desc,
                            content_type,
                            settings,
                            &resolver,
                            &base,
                        )
                        .await
                    }
                    SitemapSource::Taxonomy(taxonomy) => {
                        standard::taxonomy_entries(
                            self.terms.as_ref(),
                            desc,
                            taxonomy,
                            settings,
                            &resolver,
                            &base,
                        )
                        .await
                    }
                };
                writer::render_urlset(&entries, Extensions::IMAGE, &stylesheet)
            }
            SitemapTarget::News => {
                let entries =
                    news::news_entries(self.content.as_ref(), settings, &resolver, &base, now)
                        .await;
                writer::render_urlset(&entries, Extensions::NEWS_AND_IMAGE, &stylesheet)
            }
            SitemapTarget::Video => {
                let entries =
                    video::video_entries(self.content.as_ref(), &resolver, &base).await;
                writer::render_urlset(&entries, Extensions::VIDEO_AND_IMAGE, &stylesheet)
            }
        }
    }
}

/// Whether settings admit the target at all.
fn target_enabled(settings: &SeoSettingsRecord, target: SitemapTarget) -> bool {
    match target {
        SitemapTarget::Index => true,
        SitemapTarget::Kind(kind) => settings.sitemap.for_kind(kind).include,
        SitemapTarget::News => settings.news.enabled,
        SitemapTarget::Video => settings.video_sitemap_enabled,
    }
}

/// The index document: one reference per included kind, plus news/video
/// when their feature flags are on.
fn index_entries(
    settings: &SeoSettingsRecord,
    base: &str,
    now: OffsetDateTime,
) -> Vec<IndexEntry> {
    let mut entries = Vec::new();
    for desc in REGISTRY {
        if !settings.sitemap.for_kind(desc.kind).include {
            continue;
        }
        entries.push(IndexEntry {
            loc: format!("{base}/sitemap-{}.xml", desc.slug),
            last_modified: now,
        });
    }
    if settings.news.enabled {
        entries.push(IndexEntry {
            loc: format!("{base}/news-sitemap.xml"),
            last_modified: now,
        });
    }
    if settings.video_sitemap_enabled {
        entries.push(IndexEntry {
            loc: format!("{base}/video-sitemap.xml"),
            last_modified: now,
        });
    }
    entries
}

/// Canonical site base without a trailing slash. The configured URL is
/// validated once per pass; an unparsable value is used as-is after
/// trimming, keeping generation best-effort.
fn site_base(settings: &SeoSettingsRecord) -> String {
    let trimmed = settings.public_site_url.trim_end_matches('/');
    if url::Url::parse(trimmed).is_err() {
        warn!(
            target = SOURCE,
            url = %settings.public_site_url,
            "configured public site URL does not parse as an absolute URL"
        );
    }
    trimmed.to_string()
}

/// Permalink for a content item. Pages live at the site root; posts and
/// products under their section prefix. All content paths end with a slash.
fn content_location(base: &str, record: &ContentRecord) -> String {
    match record.content_type {
        ContentType::Post => format!("{base}/posts/{}/", record.slug),
        ContentType::Page => format!("{base}/{}/", record.slug),
        ContentType::Product => format!("{base}/products/{}/", record.slug),
    }
}

/// Permalink for a taxonomy term.
fn term_location(base: &str, term: &TermRecord) -> String {
    match term.taxonomy {
        Taxonomy::Category => format!("{base}/category/{}/", term.slug),
        Taxonomy::ProductCategory => format!("{base}/product-category/{}/", term.slug),
    }
}
