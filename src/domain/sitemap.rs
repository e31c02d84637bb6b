//! The sitemap type registry and the transient entry model.
//!
//! The registry is the fixed strategy table behind the whole subsystem: one
//! descriptor per sitemap kind carrying its URL slug, generation source, and
//! the policy defaults used when settings are empty or malformed. News and
//! video sitemaps sit outside the registry; they are feature-flagged specials
//! with their own virtual paths.

use time::{Date, OffsetDateTime};

use crate::domain::entities::{ResolvedPolicy, SitemapPolicy};
use crate::domain::types::{ChangeFrequency, ContentType, Taxonomy};

/// A registered sitemap document kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SitemapKind {
    Homepage,
    Post,
    Page,
    Product,
    Category,
    ProductCategory,
}

/// Where a kind's entries come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapSource {
    Homepage,
    Content(ContentType),
    Taxonomy(Taxonomy),
}

/// Static description of one sitemap kind.
#[derive(Debug, Clone, Copy)]
pub struct SitemapDescriptor {
    pub kind: SitemapKind,
    /// Path fragment in `/sitemap-{slug}.xml`.
    pub slug: &'static str,
    pub label: &'static str,
    pub source: SitemapSource,
    pub default_frequency: ChangeFrequency,
    pub default_priority: &'static str,
}

/// The fixed set of registered kinds, in index order.
pub const REGISTRY: &[SitemapDescriptor] = &[
    SitemapDescriptor {
        kind: SitemapKind::Homepage,
        slug: "homepage",
        label: "Homepage",
        source: SitemapSource::Homepage,
        default_frequency: ChangeFrequency::Daily,
        default_priority: "1.0",
    },
    SitemapDescriptor {
        kind: SitemapKind::Post,
        slug: "post",
        label: "Posts",
        source: SitemapSource::Content(ContentType::Post),
        default_frequency: ChangeFrequency::Weekly,
        default_priority: "0.8",
    },
    SitemapDescriptor {
        kind: SitemapKind::Page,
        slug: "page",
        label: "Pages",
        source: SitemapSource::Content(ContentType::Page),
        default_frequency: ChangeFrequency::Monthly,
        default_priority: "0.6",
    },
    SitemapDescriptor {
        kind: SitemapKind::Product,
        slug: "product",
        label: "Products",
        source: SitemapSource::Content(ContentType::Product),
        default_frequency: ChangeFrequency::Weekly,
        default_priority: "0.9",
    },
    SitemapDescriptor {
        kind: SitemapKind::Category,
        slug: "category",
        label: "Post Categories",
        source: SitemapSource::Taxonomy(Taxonomy::Category),
        default_frequency: ChangeFrequency::Weekly,
        default_priority: "0.5",
    },
    SitemapDescriptor {
        kind: SitemapKind::ProductCategory,
        slug: "product_cat",
        label: "Product Categories",
        source: SitemapSource::Taxonomy(Taxonomy::ProductCategory),
        default_frequency: ChangeFrequency::Weekly,
        default_priority: "0.5",
    },
];

/// Look up the descriptor for a kind.
pub fn descriptor(kind: SitemapKind) -> &'static SitemapDescriptor {
    match kind {
        SitemapKind::Homepage => &REGISTRY[0],
        SitemapKind::Post => &REGISTRY[1],
        SitemapKind::Page => &REGISTRY[2],
        SitemapKind::Product => &REGISTRY[3],
        SitemapKind::Category => &REGISTRY[4],
        SitemapKind::ProductCategory => &REGISTRY[5],
    }
}

/// Resolve a registered slug (`/sitemap-{slug}.xml`) to its descriptor.
pub fn find_by_slug(slug: &str) -> Option<&'static SitemapDescriptor> {
    REGISTRY.iter().find(|desc| desc.slug == slug)
}

impl SitemapDescriptor {
    /// Resolve a stored policy against this kind's defaults.
    ///
    /// Empty or unparsable frequencies fall back to the default frequency;
    /// priorities must parse as a number inside the protocol range 0.0–1.0
    /// or the default is used instead. Defaulting happens here, at read
    /// time — malformed values are never surfaced to the caller.
    pub fn resolve_policy(&self, policy: &SitemapPolicy) -> ResolvedPolicy {
        let frequency = policy
            .frequency
            .trim()
            .parse::<ChangeFrequency>()
            .unwrap_or(self.default_frequency);

        let raw_priority = policy.priority.trim();
        let priority = match raw_priority.parse::<f64>() {
            Ok(value) if (0.0..=1.0).contains(&value) => raw_priority.to_string(),
            _ => self.default_priority.to_string(),
        };

        ResolvedPolicy {
            frequency,
            priority,
        }
    }
}

/// Last-modification stamp for one entry.
///
/// Content rows carry calendar dates; index rows carry full timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastModified {
    Day(Date),
    Instant(OffsetDateTime),
}

/// An image annotation inside a `<url>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapImage {
    pub url: String,
    pub title: String,
    pub caption: Option<String>,
}

/// The news extension block; mandatory for news sitemap entries.
#[derive(Debug, Clone, PartialEq)]
pub struct NewsAnnotation {
    pub publication_name: String,
    pub publication_language: String,
    pub title: String,
    pub published_at: OffsetDateTime,
}

/// The video extension block.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoAnnotation {
    pub thumbnail_url: String,
    pub title: String,
    pub description: String,
    pub content_url: String,
    pub duration_seconds: Option<u32>,
    pub published_at: OffsetDateTime,
}

/// One `<url>` row of a urlset document. Built per generation pass and never
/// persisted beyond the serialized document in the cache.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub last_modified: Option<LastModified>,
    pub change_frequency: Option<ChangeFrequency>,
    pub priority: Option<String>,
    pub images: Vec<SitemapImage>,
    pub video: Option<VideoAnnotation>,
    pub news: Option<NewsAnnotation>,
}

impl SitemapEntry {
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            ..Self::default()
        }
    }
}

/// One `<sitemap>` row of the sitemapindex document.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    pub loc: String,
    pub last_modified: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_slugs_resolve_to_their_descriptor() {
        for desc in REGISTRY {
            let found = find_by_slug(desc.slug).expect("registered slug");
            assert_eq!(found.kind, desc.kind);
            assert_eq!(descriptor(desc.kind).slug, desc.slug);
        }
    }

    #[test]
    fn unknown_slug_is_not_found() {
        assert!(find_by_slug("news").is_none());
        assert!(find_by_slug("attachment").is_none());
    }

    #[test]
    fn malformed_policy_values_fall_back_to_defaults() {
        let desc = descriptor(SitemapKind::Page);
        let policy = SitemapPolicy {
            include: true,
            frequency: "sometimes".to_string(),
            priority: "often".to_string(),
        };
        let resolved = desc.resolve_policy(&policy);
        assert_eq!(resolved.frequency, ChangeFrequency::Monthly);
        assert_eq!(resolved.priority, "0.6");
    }

    #[test]
    fn empty_policy_values_fall_back_to_defaults() {
        let desc = descriptor(SitemapKind::Homepage);
        let resolved = desc.resolve_policy(&SitemapPolicy::included());
        assert_eq!(resolved.frequency, ChangeFrequency::Daily);
        assert_eq!(resolved.priority, "1.0");
    }

    #[test]
    fn out_of_range_priority_is_defaulted() {
        let desc = descriptor(SitemapKind::Post);
        let policy = SitemapPolicy {
            include: true,
            frequency: "daily".to_string(),
            priority: "1.5".to_string(),
        };
        let resolved = desc.resolve_policy(&policy);
        assert_eq!(resolved.frequency, ChangeFrequency::Daily);
        assert_eq!(resolved.priority, "0.8");
    }

    #[test]
    fn well_formed_policy_values_are_kept_verbatim() {
        let desc = descriptor(SitemapKind::Product);
        let policy = SitemapPolicy {
            include: true,
            frequency: "hourly".to_string(),
            priority: "0.75".to_string(),
        };
        let resolved = desc.resolve_policy(&policy);
        assert_eq!(resolved.frequency, ChangeFrequency::Hourly);
        assert_eq!(resolved.priority, "0.75");
    }
}
