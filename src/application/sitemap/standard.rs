//! Generators for the registry-backed urlset documents: homepage,
//! content-bearing types, and taxonomies.

use std::collections::HashSet;

use time::Date;
use tracing::warn;

use crate::application::repos::{ContentRepo, TermsRepo};
use crate::application::robots::RobotsResolver;
use crate::domain::entities::{ContentRecord, SeoSettingsRecord};
use crate::domain::sitemap::{
    LastModified, SitemapDescriptor, SitemapEntry, SitemapImage,
};
use crate::domain::types::{ContentType, Taxonomy};

use super::{content_location, term_location};

const SOURCE: &str = "application::sitemap::standard";

/// Gallery images emitted per product beyond the featured image.
const GALLERY_IMAGE_LIMIT: usize = 5;

/// The homepage document: a single entry, no content query, optionally
/// annotated with the site logo.
pub(super) fn homepage_entries(
    settings: &SeoSettingsRecord,
    base: &str,
    today: Date,
) -> Vec<SitemapEntry> {
    let desc = crate::domain::sitemap::descriptor(crate::domain::sitemap::SitemapKind::Homepage);
    let policy = desc.resolve_policy(settings.sitemap.for_kind(desc.kind));

    let mut entry = SitemapEntry::new(format!("{base}/"));
    entry.last_modified = Some(LastModified::Day(today));
    entry.change_frequency = Some(policy.frequency);
    entry.priority = Some(policy.priority);

    if let Some(logo_url) = settings.site_logo_url.as_deref().filter(|url| !url.is_empty()) {
        entry.images.push(SitemapImage {
            url: logo_url.to_string(),
            title: settings.site_name.clone(),
            caption: (!settings.site_tagline.is_empty()).then(|| settings.site_tagline.clone()),
        });
    }

    vec![entry]
}

/// One urlset over every published item of a content type.
pub(super) async fn content_entries(
    repo: &dyn ContentRepo,
    desc: &SitemapDescriptor,
    content_type: ContentType,
    settings: &SeoSettingsRecord,
    resolver: &RobotsResolver,
    base: &str,
) -> Vec<SitemapEntry> {
    let policy = desc.resolve_policy(settings.sitemap.for_kind(desc.kind));

    let items = match repo.list_published(content_type).await {
        Ok(items) => items,
        Err(err) => {
            warn!(
                target = SOURCE,
                content_type = content_type.as_str(),
                error = %err,
                "content query failed; emitting empty document"
            );
            Vec::new()
        }
    };

    let excluded: HashSet<&str> = if content_type == ContentType::Page {
        settings
            .excluded_page_slugs
            .iter()
            .map(String::as_str)
            .collect()
    } else {
        HashSet::new()
    };

    let mut entries = Vec::with_capacity(items.len());
    for item in &items {
        if excluded.contains(item.slug.as_str()) {
            continue;
        }

        let loc = content_location(base, item);
        if resolver.for_content(item, &loc).is_noindex() {
            continue;
        }

        let mut entry = SitemapEntry::new(loc);
        entry.last_modified = Some(LastModified::Day(item.updated_at.date()));
        entry.change_frequency = Some(policy.frequency);
        entry.priority = Some(policy.priority.clone());
        entry.images = item_images(item, content_type);
        entries.push(entry);
    }
    entries
}

fn item_images(item: &ContentRecord, content_type: ContentType) -> Vec<SitemapImage> {
    let mut images = Vec::new();

    if let Some(featured) = item.featured_image.as_ref() {
        images.push(SitemapImage {
            url: featured.url.clone(),
            title: item.title.clone(),
            caption: featured.alt.clone().filter(|alt| !alt.is_empty()),
        });
    }

    if content_type == ContentType::Product {
        for image in item.gallery.iter().take(GALLERY_IMAGE_LIMIT) {
            images.push(SitemapImage {
                url: image.url.clone(),
                title: item.title.clone(),
                caption: image.alt.clone().filter(|alt| !alt.is_empty()),
            });
        }
    }

    images
}

/// One urlset over every populated term of a taxonomy. A failed term lookup
/// degrades to an empty document rather than failing the request.
pub(super) async fn taxonomy_entries(
    repo: &dyn TermsRepo,
    desc: &SitemapDescriptor,
    taxonomy: Taxonomy,
    settings: &SeoSettingsRecord,
    resolver: &RobotsResolver,
    base: &str,
) -> Vec<SitemapEntry> {
    let policy = desc.resolve_policy(settings.sitemap.for_kind(desc.kind));

    let terms = match repo.list_populated(taxonomy).await {
        Ok(terms) => terms,
        Err(err) => {
            warn!(
                target = SOURCE,
                taxonomy = taxonomy.as_str(),
                error = %err,
                "term query failed; emitting empty document"
            );
            Vec::new()
        }
    };

    let mut entries = Vec::with_capacity(terms.len());
    for term in &terms {
        if term.content_count <= 0 {
            continue;
        }

        let loc = term_location(base, term);
        if resolver.for_term(term, &loc).is_noindex() {
            continue;
        }

        let mut entry = SitemapEntry::new(loc);
        entry.change_frequency = Some(policy.frequency);
        entry.priority = Some(policy.priority.clone());
        if let Some(thumbnail) = term.thumbnail_url.as_deref().filter(|url| !url.is_empty()) {
            entry.images.push(SitemapImage {
                url: thumbnail.to_string(),
                title: term.name.clone(),
                caption: term
                    .description
                    .clone()
                    .filter(|description| !description.is_empty()),
            });
        }
        entries.push(entry);
    }
    entries
}
