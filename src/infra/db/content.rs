use async_trait::async_trait;
use sqlx::types::Json;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    application::repos::{ContentRepo, RepoError},
    domain::entities::{ContentRecord, ImageRef, VideoMetadata},
    domain::types::{ContentStatus, ContentType, RobotsDirective},
};

use super::{PostgresRepositories, map_sqlx_error};

const CONTENT_COLUMNS: &str = "id, slug, title, content_type, status, excerpt, \
     published_at, updated_at, robots_directive, \
     featured_image_url, featured_image_alt, gallery, \
     video_content_url, video_thumbnail_url, video_title, video_description, \
     video_duration_seconds, video_published_at";

#[derive(sqlx::FromRow)]
struct ContentRow {
    id: Uuid,
    slug: String,
    title: String,
    content_type: ContentType,
    status: ContentStatus,
    excerpt: String,
    published_at: Option<OffsetDateTime>,
    updated_at: OffsetDateTime,
    robots_directive: Option<String>,
    featured_image_url: Option<String>,
    featured_image_alt: Option<String>,
    gallery: Json<Vec<ImageRef>>,
    video_content_url: Option<String>,
    video_thumbnail_url: Option<String>,
    video_title: Option<String>,
    video_description: Option<String>,
    video_duration_seconds: Option<i32>,
    video_published_at: Option<OffsetDateTime>,
}

impl From<ContentRow> for ContentRecord {
    fn from(row: ContentRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            title: row.title,
            content_type: row.content_type,
            status: row.status,
            excerpt: row.excerpt,
            published_at: row.published_at,
            updated_at: row.updated_at,
            // Unknown stored directives behave as unset; resolution falls
            // back to the type default at read time.
            robots: row
                .robots_directive
                .as_deref()
                .and_then(|raw| raw.parse::<RobotsDirective>().ok()),
            featured_image: row.featured_image_url.map(|url| ImageRef {
                url,
                alt: row.featured_image_alt,
            }),
            gallery: row.gallery.0,
            video: VideoMetadata {
                content_url: row.video_content_url,
                thumbnail_url: row.video_thumbnail_url,
                title: row.video_title,
                description: row.video_description,
                duration_seconds: row.video_duration_seconds,
                published_at: row.video_published_at,
            },
        }
    }
}

#[async_trait]
impl ContentRepo for PostgresRepositories {
    async fn list_published(
        &self,
        content_type: ContentType,
    ) -> Result<Vec<ContentRecord>, RepoError> {
        let sql = format!(
            "SELECT {CONTENT_COLUMNS} FROM contents \
             WHERE content_type = $1 AND status = $2 \
             ORDER BY updated_at DESC, slug"
        );
        let rows: Vec<ContentRow> = sqlx::query_as(&sql)
            .bind(content_type)
            .bind(ContentStatus::Published)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ContentRecord::from).collect())
    }

    async fn list_published_since(
        &self,
        content_types: &[ContentType],
        cutoff: OffsetDateTime,
        limit: u32,
    ) -> Result<Vec<ContentRecord>, RepoError> {
        let sql = format!(
            "SELECT {CONTENT_COLUMNS} FROM contents \
             WHERE content_type = ANY($1) AND status = $2 AND published_at >= $3 \
             ORDER BY published_at DESC \
             LIMIT $4"
        );
        let rows: Vec<ContentRow> = sqlx::query_as(&sql)
            .bind(content_types.to_vec())
            .bind(ContentStatus::Published)
            .bind(cutoff)
            .bind(i64::from(limit))
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ContentRecord::from).collect())
    }

    async fn list_video_candidates(&self) -> Result<Vec<ContentRecord>, RepoError> {
        let sql = format!(
            "SELECT {CONTENT_COLUMNS} FROM contents \
             WHERE status = $1 \
               AND (video_content_url IS NOT NULL OR video_thumbnail_url IS NOT NULL) \
             ORDER BY updated_at DESC, slug"
        );
        let rows: Vec<ContentRow> = sqlx::query_as(&sql)
            .bind(ContentStatus::Published)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ContentRecord::from).collect())
    }
}
