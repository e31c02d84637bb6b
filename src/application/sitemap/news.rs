//! The news sitemap generator.
//!
//! Publication windows and entry caps follow the news sitemap protocol:
//! only items published in the last 48 hours qualify, and a document never
//! carries more than 1000 entries. Every emitted entry carries the news
//! extension block; an entry without one is invalid for this document.

use time::{Duration, OffsetDateTime};
use tracing::warn;

use crate::application::repos::ContentRepo;
use crate::application::robots::RobotsResolver;
use crate::domain::entities::SeoSettingsRecord;
use crate::domain::sitemap::{NewsAnnotation, SitemapEntry, SitemapImage};

use super::content_location;

const SOURCE: &str = "application::sitemap::news";

const PUBLICATION_WINDOW_HOURS: i64 = 48;
const MAX_ENTRIES: u32 = 1000;

pub(super) async fn news_entries(
    repo: &dyn ContentRepo,
    settings: &SeoSettingsRecord,
    resolver: &RobotsResolver,
    base: &str,
    now: OffsetDateTime,
) -> Vec<SitemapEntry> {
    let cutoff = now - Duration::hours(PUBLICATION_WINDOW_HOURS);
    let items = match repo
        .list_published_since(&settings.news.content_types, cutoff, MAX_ENTRIES)
        .await
    {
        Ok(items) => items,
        Err(err) => {
            warn!(
                target = SOURCE,
                error = %err,
                "news content query failed; emitting empty document"
            );
            Vec::new()
        }
    };

    let publication_name = if settings.news.publication_name.is_empty() {
        settings.site_name.as_str()
    } else {
        settings.news.publication_name.as_str()
    };

    let mut entries = Vec::new();
    for item in items.iter().take(MAX_ENTRIES as usize) {
        let loc = content_location(base, item);
        if resolver.for_content(item, &loc).is_noindex() {
            continue;
        }

        let published_at = item.published_at.unwrap_or(item.updated_at);
        let mut entry = SitemapEntry::new(loc);
        entry.news = Some(NewsAnnotation {
            publication_name: publication_name.to_string(),
            publication_language: settings.news.publication_language.clone(),
            title: item.title.clone(),
            published_at,
        });
        if let Some(featured) = item.featured_image.as_ref() {
            entry.images.push(SitemapImage {
                url: featured.url.clone(),
                title: item.title.clone(),
                caption: featured.alt.clone().filter(|alt| !alt.is_empty()),
            });
        }
        entries.push(entry);
    }
    entries
}
