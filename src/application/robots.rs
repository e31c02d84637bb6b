//! Effective robots directive resolution.
//!
//! Resolution order, most specific first: a URL matching a blocked pattern is
//! `noindex,nofollow` outright; otherwise the item- or term-level override
//! applies; otherwise the configured per-type default; otherwise
//! `index,follow`. Sitemap generators call this before emitting any entry so
//! that indexability and sitemap membership stay consistent.

use regex::{Regex, RegexBuilder};
use tracing::warn;

use crate::domain::entities::{ContentRecord, RobotsPolicy, TermRecord};
use crate::domain::types::RobotsDirective;

const SOURCE: &str = "application::robots";

/// Request-scoped resolver built from one settings snapshot.
pub struct RobotsResolver {
    policy: RobotsPolicy,
    blocked: Vec<Regex>,
}

impl RobotsResolver {
    pub fn new(policy: RobotsPolicy) -> Self {
        let blocked = policy
            .blocked_patterns
            .iter()
            .filter_map(|pattern| {
                let trimmed = pattern.trim();
                if trimmed.is_empty() {
                    return None;
                }
                match wildcard_regex(trimmed) {
                    Ok(regex) => Some(regex),
                    Err(err) => {
                        warn!(
                            target = SOURCE,
                            pattern = trimmed,
                            error = %err,
                            "skipping unusable blocked-URL pattern"
                        );
                        None
                    }
                }
            })
            .collect();

        Self { policy, blocked }
    }

    /// True when the URL matches a configured blocked pattern.
    pub fn is_blocked(&self, url: &str) -> bool {
        self.blocked.iter().any(|regex| regex.is_match(url))
    }

    /// Effective directive for a content item at the given URL.
    pub fn for_content(&self, record: &ContentRecord, url: &str) -> RobotsDirective {
        if self.is_blocked(url) {
            return RobotsDirective::NoindexNofollow;
        }
        record
            .robots
            .unwrap_or_else(|| self.policy.default_for_content(record.content_type))
    }

    /// Effective directive for a term at the given URL.
    pub fn for_term(&self, term: &TermRecord, url: &str) -> RobotsDirective {
        if self.is_blocked(url) {
            return RobotsDirective::NoindexNofollow;
        }
        term.robots
            .unwrap_or_else(|| self.policy.default_for_taxonomy(term.taxonomy))
    }
}

/// Compile a blocklist pattern: literal text anchored at the start of the
/// URL, with `*` matching any run of characters.
fn wildcard_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let escaped = regex::escape(pattern).replace("\\*", ".*");
    RegexBuilder::new(&format!("^{escaped}"))
        .case_insensitive(true)
        .build()
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;
    use uuid::Uuid;

    use super::*;
    use crate::domain::entities::VideoMetadata;
    use crate::domain::types::{ContentStatus, ContentType, Taxonomy};

    fn record(content_type: ContentType, robots: Option<RobotsDirective>) -> ContentRecord {
        ContentRecord {
            id: Uuid::nil(),
            slug: "sample".to_string(),
            title: "Sample".to_string(),
            content_type,
            status: ContentStatus::Published,
            excerpt: String::new(),
            published_at: Some(OffsetDateTime::UNIX_EPOCH),
            updated_at: OffsetDateTime::UNIX_EPOCH,
            robots,
            featured_image: None,
            gallery: Vec::new(),
            video: VideoMetadata::default(),
        }
    }

    fn term(taxonomy: Taxonomy, robots: Option<RobotsDirective>) -> TermRecord {
        TermRecord {
            id: Uuid::nil(),
            slug: "sample".to_string(),
            name: "Sample".to_string(),
            taxonomy,
            description: None,
            content_count: 3,
            thumbnail_url: None,
            robots,
        }
    }

    #[test]
    fn item_override_wins_over_type_default() {
        let resolver = RobotsResolver::new(RobotsPolicy::default());
        let item = record(
            ContentType::Post,
            Some(RobotsDirective::NoindexFollow),
        );
        assert_eq!(
            resolver.for_content(&item, "https://example.test/posts/sample/"),
            RobotsDirective::NoindexFollow
        );
    }

    #[test]
    fn missing_override_falls_back_to_type_default() {
        let policy = RobotsPolicy {
            product_default: RobotsDirective::IndexNofollow,
            ..RobotsPolicy::default()
        };
        let resolver = RobotsResolver::new(policy);
        let item = record(ContentType::Product, None);
        assert_eq!(
            resolver.for_content(&item, "https://example.test/products/sample/"),
            RobotsDirective::IndexNofollow
        );
    }

    #[test]
    fn blocked_pattern_forces_noindex_nofollow() {
        let policy = RobotsPolicy {
            blocked_patterns: vec!["https://example.test/private*".to_string()],
            ..RobotsPolicy::default()
        };
        let resolver = RobotsResolver::new(policy);
        let item = record(ContentType::Page, Some(RobotsDirective::IndexFollow));
        assert_eq!(
            resolver.for_content(&item, "https://example.test/private-notes/"),
            RobotsDirective::NoindexNofollow
        );
        assert!(resolver.is_blocked("HTTPS://EXAMPLE.TEST/PRIVATE/"));
        assert!(!resolver.is_blocked("https://example.test/public/"));
    }

    #[test]
    fn term_resolution_uses_taxonomy_default() {
        let policy = RobotsPolicy {
            product_category_default: RobotsDirective::NoindexFollow,
            ..RobotsPolicy::default()
        };
        let resolver = RobotsResolver::new(policy);
        let plain = term(Taxonomy::ProductCategory, None);
        assert!(
            resolver
                .for_term(&plain, "https://example.test/product-category/sample/")
                .is_noindex()
        );
        let overridden = term(Taxonomy::ProductCategory, Some(RobotsDirective::IndexFollow));
        assert_eq!(
            resolver.for_term(&overridden, "https://example.test/product-category/sample/"),
            RobotsDirective::IndexFollow
        );
    }

    #[test]
    fn unusable_patterns_are_skipped() {
        let policy = RobotsPolicy {
            blocked_patterns: vec![String::new(), "   ".to_string()],
            ..RobotsPolicy::default()
        };
        let resolver = RobotsResolver::new(policy);
        assert!(!resolver.is_blocked("https://example.test/"));
    }
}
