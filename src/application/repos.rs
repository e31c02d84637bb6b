//! Repository traits describing the platform's content and settings stores.
//!
//! Sentiero never writes through these traits; content mutation happens in
//! the platform itself and reaches this process only as a cache purge.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;

use crate::domain::entities::{ContentRecord, SeoSettingsRecord, TermRecord};
use crate::domain::types::{ContentType, Taxonomy};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("resource not found")]
    NotFound,
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

#[async_trait]
pub trait ContentRepo: Send + Sync {
    /// All published items of one type, most recently modified first.
    async fn list_published(
        &self,
        content_type: ContentType,
    ) -> Result<Vec<ContentRecord>, RepoError>;

    /// Published items of the given types published at or after `cutoff`,
    /// newest first, bounded by `limit`.
    async fn list_published_since(
        &self,
        content_types: &[ContentType],
        cutoff: OffsetDateTime,
        limit: u32,
    ) -> Result<Vec<ContentRecord>, RepoError>;

    /// Published items carrying any video metadata at all. Callers still
    /// enforce the content-URL-and-thumbnail requirement per item.
    async fn list_video_candidates(&self) -> Result<Vec<ContentRecord>, RepoError>;
}

#[async_trait]
pub trait TermsRepo: Send + Sync {
    /// Terms of one taxonomy with at least one published item attached.
    async fn list_populated(&self, taxonomy: Taxonomy) -> Result<Vec<TermRecord>, RepoError>;
}

#[async_trait]
pub trait SettingsRepo: Send + Sync {
    async fn load_seo_settings(&self) -> Result<SeoSettingsRecord, RepoError>;
}
