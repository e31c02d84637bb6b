//! Domain entities mirrored from the platform's persistent storage.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::types::{
    ChangeFrequency, ContentStatus, ContentType, RobotsDirective, Taxonomy,
};

/// Page slugs excluded from the page sitemap unless the settings row
/// overrides the list: commerce and account flows that carry no search value.
pub const DEFAULT_EXCLUDED_PAGE_SLUGS: &[&str] = &[
    "checkout",
    "cart",
    "my-account",
    "wishlist",
    "order-received",
    "order-pay",
    "lost-password",
    "view-order",
    "add-payment-method",
];

/// An image attached to a content item or term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, serde::Deserialize)]
pub struct ImageRef {
    pub url: String,
    pub alt: Option<String>,
}

/// Video metadata attached to a content item.
///
/// Every field is independently optional; the video sitemap only admits
/// items where both `content_url` and `thumbnail_url` are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VideoMetadata {
    pub content_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_seconds: Option<i32>,
    pub published_at: Option<OffsetDateTime>,
}

impl VideoMetadata {
    /// True when the protocol-required fields are both present.
    pub fn has_essentials(&self) -> bool {
        self.content_url.is_some() && self.thumbnail_url.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentRecord {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub content_type: ContentType,
    pub status: ContentStatus,
    pub excerpt: String,
    pub published_at: Option<OffsetDateTime>,
    pub updated_at: OffsetDateTime,
    /// Item-level robots override; `None` falls back to the type default.
    pub robots: Option<RobotsDirective>,
    pub featured_image: Option<ImageRef>,
    pub gallery: Vec<ImageRef>,
    pub video: VideoMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermRecord {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub taxonomy: Taxonomy,
    pub description: Option<String>,
    /// Number of published items attached to the term.
    pub content_count: i64,
    pub thumbnail_url: Option<String>,
    /// Term-level robots override; `None` falls back to the taxonomy default.
    pub robots: Option<RobotsDirective>,
}

/// Per-kind sitemap generation policy as stored in settings.
///
/// `frequency` and `priority` stay raw strings: malformed values are replaced
/// with the registry defaults when the policy is resolved, never rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SitemapPolicy {
    pub include: bool,
    pub frequency: String,
    pub priority: String,
}

impl SitemapPolicy {
    pub fn included() -> Self {
        Self {
            include: true,
            frequency: String::new(),
            priority: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapPolicies {
    pub homepage: SitemapPolicy,
    pub post: SitemapPolicy,
    pub page: SitemapPolicy,
    pub product: SitemapPolicy,
    pub category: SitemapPolicy,
    pub product_category: SitemapPolicy,
}

impl SitemapPolicies {
    pub fn for_kind(&self, kind: crate::domain::sitemap::SitemapKind) -> &SitemapPolicy {
        use crate::domain::sitemap::SitemapKind;
        match kind {
            SitemapKind::Homepage => &self.homepage,
            SitemapKind::Post => &self.post,
            SitemapKind::Page => &self.page,
            SitemapKind::Product => &self.product,
            SitemapKind::Category => &self.category,
            SitemapKind::ProductCategory => &self.product_category,
        }
    }
}

impl Default for SitemapPolicies {
    fn default() -> Self {
        Self {
            homepage: SitemapPolicy::included(),
            post: SitemapPolicy::included(),
            page: SitemapPolicy::included(),
            product: SitemapPolicy::included(),
            category: SitemapPolicy::included(),
            product_category: SitemapPolicy::included(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsSettings {
    pub enabled: bool,
    pub publication_name: String,
    pub publication_language: String,
    /// Content types admitted into the news sitemap.
    pub content_types: Vec<ContentType>,
}

impl Default for NewsSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            publication_name: String::new(),
            publication_language: "en".to_string(),
            content_types: vec![ContentType::Post],
        }
    }
}

/// Default robots directives per surface plus the URL-pattern blocklist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RobotsPolicy {
    pub post_default: RobotsDirective,
    pub page_default: RobotsDirective,
    pub product_default: RobotsDirective,
    pub category_default: RobotsDirective,
    pub product_category_default: RobotsDirective,
    /// One pattern per entry; `*` matches any run of characters.
    pub blocked_patterns: Vec<String>,
}

impl RobotsPolicy {
    pub fn default_for_content(&self, content_type: ContentType) -> RobotsDirective {
        match content_type {
            ContentType::Post => self.post_default,
            ContentType::Page => self.page_default,
            ContentType::Product => self.product_default,
        }
    }

    pub fn default_for_taxonomy(&self, taxonomy: Taxonomy) -> RobotsDirective {
        match taxonomy {
            Taxonomy::Category => self.category_default,
            Taxonomy::ProductCategory => self.product_category_default,
        }
    }
}

impl Default for RobotsPolicy {
    fn default() -> Self {
        Self {
            post_default: RobotsDirective::IndexFollow,
            page_default: RobotsDirective::IndexFollow,
            product_default: RobotsDirective::IndexFollow,
            category_default: RobotsDirective::IndexFollow,
            product_category_default: RobotsDirective::IndexFollow,
            blocked_patterns: Vec::new(),
        }
    }
}

/// The SEO settings row, read as one record per generation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeoSettingsRecord {
    pub public_site_url: String,
    pub site_name: String,
    pub site_tagline: String,
    pub site_logo_url: Option<String>,
    pub sitemap: SitemapPolicies,
    pub news: NewsSettings,
    pub video_sitemap_enabled: bool,
    pub robots: RobotsPolicy,
    pub excluded_page_slugs: Vec<String>,
    pub updated_at: OffsetDateTime,
}

impl Default for SeoSettingsRecord {
    fn default() -> Self {
        Self {
            public_site_url: "http://localhost".to_string(),
            site_name: String::new(),
            site_tagline: String::new(),
            site_logo_url: None,
            sitemap: SitemapPolicies::default(),
            news: NewsSettings::default(),
            video_sitemap_enabled: false,
            robots: RobotsPolicy::default(),
            excluded_page_slugs: DEFAULT_EXCLUDED_PAGE_SLUGS
                .iter()
                .map(|slug| (*slug).to_string())
                .collect(),
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }
}

/// A sitemap policy resolved against the registry defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPolicy {
    pub frequency: ChangeFrequency,
    pub priority: String,
}
