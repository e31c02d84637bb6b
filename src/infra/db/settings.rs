use async_trait::async_trait;
use time::OffsetDateTime;

use crate::{
    application::repos::{RepoError, SettingsRepo},
    domain::entities::{
        NewsSettings, RobotsPolicy, SeoSettingsRecord, SitemapPolicies, SitemapPolicy,
    },
    domain::types::{ContentType, RobotsDirective},
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct SeoSettingsRow {
    public_site_url: String,
    site_name: String,
    site_tagline: String,
    site_logo_url: Option<String>,
    homepage_include: bool,
    homepage_frequency: String,
    homepage_priority: String,
    post_include: bool,
    post_frequency: String,
    post_priority: String,
    page_include: bool,
    page_frequency: String,
    page_priority: String,
    product_include: bool,
    product_frequency: String,
    product_priority: String,
    category_include: bool,
    category_frequency: String,
    category_priority: String,
    product_category_include: bool,
    product_category_frequency: String,
    product_category_priority: String,
    news_enabled: bool,
    news_publication_name: String,
    news_publication_language: String,
    news_content_types: Vec<String>,
    video_sitemap_enabled: bool,
    robots_post_default: String,
    robots_page_default: String,
    robots_product_default: String,
    robots_category_default: String,
    robots_product_category_default: String,
    robots_blocked_patterns: Vec<String>,
    excluded_page_slugs: Vec<String>,
    updated_at: OffsetDateTime,
}

fn policy(include: bool, frequency: String, priority: String) -> SitemapPolicy {
    SitemapPolicy {
        include,
        frequency,
        priority,
    }
}

/// Stored directives are free text; anything unrecognized falls back to
/// `index,follow` at read time.
fn directive(raw: &str) -> RobotsDirective {
    raw.parse().unwrap_or(RobotsDirective::IndexFollow)
}

impl From<SeoSettingsRow> for SeoSettingsRecord {
    fn from(row: SeoSettingsRow) -> Self {
        let content_types: Vec<ContentType> = row
            .news_content_types
            .iter()
            .filter_map(|raw| ContentType::try_from(raw.as_str()).ok())
            .collect();

        Self {
            public_site_url: row.public_site_url,
            site_name: row.site_name,
            site_tagline: row.site_tagline,
            site_logo_url: row.site_logo_url,
            sitemap: SitemapPolicies {
                homepage: policy(
                    row.homepage_include,
                    row.homepage_frequency,
                    row.homepage_priority,
                ),
                post: policy(row.post_include, row.post_frequency, row.post_priority),
                page: policy(row.page_include, row.page_frequency, row.page_priority),
                product: policy(
                    row.product_include,
                    row.product_frequency,
                    row.product_priority,
                ),
                category: policy(
                    row.category_include,
                    row.category_frequency,
                    row.category_priority,
                ),
                product_category: policy(
                    row.product_category_include,
                    row.product_category_frequency,
                    row.product_category_priority,
                ),
            },
            news: NewsSettings {
                enabled: row.news_enabled,
                publication_name: row.news_publication_name,
                publication_language: row.news_publication_language,
                content_types,
            },
            video_sitemap_enabled: row.video_sitemap_enabled,
            robots: RobotsPolicy {
                post_default: directive(&row.robots_post_default),
                page_default: directive(&row.robots_page_default),
                product_default: directive(&row.robots_product_default),
                category_default: directive(&row.robots_category_default),
                product_category_default: directive(&row.robots_product_category_default),
                blocked_patterns: row.robots_blocked_patterns,
            },
            excluded_page_slugs: row.excluded_page_slugs,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl SettingsRepo for PostgresRepositories {
    async fn load_seo_settings(&self) -> Result<SeoSettingsRecord, RepoError> {
        let row: Option<SeoSettingsRow> = sqlx::query_as(
            "SELECT public_site_url, site_name, site_tagline, site_logo_url, \
                    homepage_include, homepage_frequency, homepage_priority, \
                    post_include, post_frequency, post_priority, \
                    page_include, page_frequency, page_priority, \
                    product_include, product_frequency, product_priority, \
                    category_include, category_frequency, category_priority, \
                    product_category_include, product_category_frequency, product_category_priority, \
                    news_enabled, news_publication_name, news_publication_language, \
                    news_content_types, video_sitemap_enabled, \
                    robots_post_default, robots_page_default, robots_product_default, \
                    robots_category_default, robots_product_category_default, \
                    robots_blocked_patterns, excluded_page_slugs, updated_at \
             FROM seo_settings \
             WHERE id = 1",
        )
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        let row = row.ok_or(RepoError::NotFound)?;
        Ok(SeoSettingsRecord::from(row))
    }
}
