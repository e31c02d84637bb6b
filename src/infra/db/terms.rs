use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    application::repos::{RepoError, TermsRepo},
    domain::entities::TermRecord,
    domain::types::{RobotsDirective, Taxonomy},
};

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct TermRow {
    id: Uuid,
    slug: String,
    name: String,
    taxonomy: Taxonomy,
    description: Option<String>,
    content_count: i64,
    thumbnail_url: Option<String>,
    robots_directive: Option<String>,
}

impl From<TermRow> for TermRecord {
    fn from(row: TermRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            name: row.name,
            taxonomy: row.taxonomy,
            description: row.description,
            content_count: row.content_count,
            thumbnail_url: row.thumbnail_url,
            robots: row
                .robots_directive
                .as_deref()
                .and_then(|raw| raw.parse::<RobotsDirective>().ok()),
        }
    }
}

#[async_trait]
impl TermsRepo for PostgresRepositories {
    async fn list_populated(&self, taxonomy: Taxonomy) -> Result<Vec<TermRecord>, RepoError> {
        let rows: Vec<TermRow> = sqlx::query_as(
            "SELECT id, slug, name, taxonomy, description, content_count, \
                    thumbnail_url, robots_directive \
             FROM terms \
             WHERE taxonomy = $1 AND content_count > 0 \
             ORDER BY LOWER(name), slug",
        )
        .bind(taxonomy)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(TermRecord::from).collect())
    }
}
