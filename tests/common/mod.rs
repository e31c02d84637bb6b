//! In-memory repository fakes and fixture builders shared by the
//! integration suites.
#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use sentiero::application::repos::{ContentRepo, RepoError, SettingsRepo, TermsRepo};
use sentiero::application::sitemap::SitemapService;
use sentiero::cache::{CacheConfig, DocumentStore};
use sentiero::domain::entities::{
    ContentRecord, ImageRef, SeoSettingsRecord, TermRecord, VideoMetadata,
};
use sentiero::domain::types::{ContentStatus, ContentType, RobotsDirective, Taxonomy};

pub const BASE_URL: &str = "https://example.test";

pub struct InMemoryContent {
    items: Mutex<Vec<ContentRecord>>,
    fail: AtomicBool,
}

impl InMemoryContent {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn push(&self, record: ContentRecord) {
        self.items.lock().expect("content lock").push(record);
    }

    pub fn clear(&self) {
        self.items.lock().expect("content lock").clear();
    }

    pub fn fail_queries(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    fn snapshot(&self) -> Result<Vec<ContentRecord>, RepoError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RepoError::from_persistence("simulated content failure"));
        }
        Ok(self.items.lock().expect("content lock").clone())
    }
}

#[async_trait]
impl ContentRepo for InMemoryContent {
    async fn list_published(
        &self,
        content_type: ContentType,
    ) -> Result<Vec<ContentRecord>, RepoError> {
        let mut items: Vec<_> = self
            .snapshot()?
            .into_iter()
            .filter(|item| {
                item.content_type == content_type && item.status == ContentStatus::Published
            })
            .collect();
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(items)
    }

    async fn list_published_since(
        &self,
        content_types: &[ContentType],
        cutoff: OffsetDateTime,
        limit: u32,
    ) -> Result<Vec<ContentRecord>, RepoError> {
        let mut items: Vec<_> = self
            .snapshot()?
            .into_iter()
            .filter(|item| {
                content_types.contains(&item.content_type)
                    && item.status == ContentStatus::Published
                    && item.published_at.is_some_and(|at| at >= cutoff)
            })
            .collect();
        items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        items.truncate(limit as usize);
        Ok(items)
    }

    async fn list_video_candidates(&self) -> Result<Vec<ContentRecord>, RepoError> {
        let mut items: Vec<_> = self
            .snapshot()?
            .into_iter()
            .filter(|item| {
                item.status == ContentStatus::Published
                    && (item.video.content_url.is_some() || item.video.thumbnail_url.is_some())
            })
            .collect();
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(items)
    }
}

pub struct InMemoryTerms {
    terms: Mutex<Vec<TermRecord>>,
    fail: AtomicBool,
}

impl InMemoryTerms {
    pub fn new() -> Self {
        Self {
            terms: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn push(&self, term: TermRecord) {
        self.terms.lock().expect("terms lock").push(term);
    }

    pub fn fail_queries(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl TermsRepo for InMemoryTerms {
    async fn list_populated(&self, taxonomy: Taxonomy) -> Result<Vec<TermRecord>, RepoError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RepoError::from_persistence("simulated term failure"));
        }
        Ok(self
            .terms
            .lock()
            .expect("terms lock")
            .iter()
            .filter(|term| term.taxonomy == taxonomy && term.content_count > 0)
            .cloned()
            .collect())
    }
}

pub struct InMemorySettings {
    settings: Mutex<SeoSettingsRecord>,
    fail: AtomicBool,
}

impl InMemorySettings {
    pub fn new(settings: SeoSettingsRecord) -> Self {
        Self {
            settings: Mutex::new(settings),
            fail: AtomicBool::new(false),
        }
    }

    pub fn update(&self, apply: impl FnOnce(&mut SeoSettingsRecord)) {
        apply(&mut self.settings.lock().expect("settings lock"));
    }

    pub fn fail_queries(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl SettingsRepo for InMemorySettings {
    async fn load_seo_settings(&self) -> Result<SeoSettingsRecord, RepoError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RepoError::from_persistence("simulated settings failure"));
        }
        Ok(self.settings.lock().expect("settings lock").clone())
    }
}

/// The service plus handles to everything behind it.
pub struct TestPlatform {
    pub content: Arc<InMemoryContent>,
    pub terms: Arc<InMemoryTerms>,
    pub settings: Arc<InMemorySettings>,
    pub cache: Arc<DocumentStore>,
    pub service: Arc<SitemapService>,
}

impl TestPlatform {
    pub fn new() -> Self {
        Self::with_settings(test_settings())
    }

    pub fn with_settings(settings: SeoSettingsRecord) -> Self {
        Self::build(settings, CacheConfig::default())
    }

    pub fn with_cache_config(cache_config: CacheConfig) -> Self {
        Self::build(test_settings(), cache_config)
    }

    fn build(settings: SeoSettingsRecord, cache_config: CacheConfig) -> Self {
        let content = Arc::new(InMemoryContent::new());
        let terms = Arc::new(InMemoryTerms::new());
        let settings = Arc::new(InMemorySettings::new(settings));
        let cache = Arc::new(DocumentStore::new(&cache_config));
        let service = Arc::new(SitemapService::new(
            content.clone(),
            terms.clone(),
            settings.clone(),
            cache.clone(),
            cache_config,
        ));
        Self {
            content,
            terms,
            settings,
            cache,
            service,
        }
    }
}

pub fn test_settings() -> SeoSettingsRecord {
    SeoSettingsRecord {
        public_site_url: BASE_URL.to_string(),
        site_name: "Example Site".to_string(),
        site_tagline: "Notes from the example team".to_string(),
        ..SeoSettingsRecord::default()
    }
}

pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

pub fn hours_ago(hours: i64) -> OffsetDateTime {
    now() - Duration::hours(hours)
}

pub fn published_item(content_type: ContentType, slug: &str, title: &str) -> ContentRecord {
    ContentRecord {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        title: title.to_string(),
        content_type,
        status: ContentStatus::Published,
        excerpt: format!("{title} excerpt"),
        published_at: Some(hours_ago(24)),
        updated_at: hours_ago(2),
        robots: None,
        featured_image: None,
        gallery: Vec::new(),
        video: VideoMetadata::default(),
    }
}

pub fn with_robots(mut record: ContentRecord, robots: RobotsDirective) -> ContentRecord {
    record.robots = Some(robots);
    record
}

pub fn with_featured_image(mut record: ContentRecord, url: &str, alt: &str) -> ContentRecord {
    record.featured_image = Some(ImageRef {
        url: url.to_string(),
        alt: Some(alt.to_string()),
    });
    record
}

pub fn with_video(
    mut record: ContentRecord,
    content_url: Option<&str>,
    thumbnail_url: Option<&str>,
) -> ContentRecord {
    record.video.content_url = content_url.map(str::to_string);
    record.video.thumbnail_url = thumbnail_url.map(str::to_string);
    record
}

pub fn populated_term(taxonomy: Taxonomy, slug: &str, name: &str, count: i64) -> TermRecord {
    TermRecord {
        id: Uuid::new_v4(),
        slug: slug.to_string(),
        name: name.to_string(),
        taxonomy,
        description: None,
        content_count: count,
        thumbnail_url: None,
        robots: None,
    }
}

pub fn body_string(body: bytes::Bytes) -> String {
    String::from_utf8(body.to_vec()).expect("utf-8 document")
}
