//! The video sitemap generator.
//!
//! The protocol requires both a content URL and a thumbnail; items missing
//! either are dropped silently rather than failing the document. Durations
//! outside 1..=28800 seconds are treated as unset.

use tracing::warn;

use crate::application::repos::ContentRepo;
use crate::application::robots::RobotsResolver;
use crate::domain::sitemap::{SitemapEntry, VideoAnnotation};

use super::content_location;

const SOURCE: &str = "application::sitemap::video";

const MAX_DURATION_SECS: i32 = 28_800;

pub(super) async fn video_entries(
    repo: &dyn ContentRepo,
    resolver: &RobotsResolver,
    base: &str,
) -> Vec<SitemapEntry> {
    let items = match repo.list_video_candidates().await {
        Ok(items) => items,
        Err(err) => {
            warn!(
                target = SOURCE,
                error = %err,
                "video content query failed; emitting empty document"
            );
            Vec::new()
        }
    };

    let mut entries = Vec::new();
    for item in &items {
        let (Some(content_url), Some(thumbnail_url)) = (
            item.video.content_url.as_deref(),
            item.video.thumbnail_url.as_deref(),
        ) else {
            continue;
        };

        let loc = content_location(base, item);
        if resolver.for_content(item, &loc).is_noindex() {
            continue;
        }

        let title = item
            .video
            .title
            .clone()
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| item.title.clone());
        let description = item
            .video
            .description
            .clone()
            .filter(|description| !description.is_empty())
            .unwrap_or_else(|| item.excerpt.clone());
        let duration_seconds = item
            .video
            .duration_seconds
            .filter(|secs| (1..=MAX_DURATION_SECS).contains(secs))
            .map(|secs| secs as u32);
        let published_at = item
            .video
            .published_at
            .or(item.published_at)
            .unwrap_or(item.updated_at);

        let mut entry = SitemapEntry::new(loc);
        entry.video = Some(VideoAnnotation {
            thumbnail_url: thumbnail_url.to_string(),
            title,
            description,
            content_url: content_url.to_string(),
            duration_seconds,
            published_at,
        });
        entries.push(entry);
    }
    entries
}
