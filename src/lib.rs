//! Sentiero: the discovery-layer companion for a self-hosted publishing
//! platform.
//!
//! Sentiero owns the XML sitemap family (index, per-type, news, video), the
//! robots directive resolution that gates sitemap membership, and a TTL
//! document cache in front of generation. Content and SEO settings live in
//! the platform's Postgres store and are read through narrow repository
//! traits; the sitemap URL surface is served over HTTP.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
