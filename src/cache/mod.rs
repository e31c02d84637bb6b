//! Sentiero document cache.
//!
//! A single-layer TTL cache over fully serialized sitemap documents. Keys
//! are the fixed document set (index, one per registered kind, news, video);
//! invalidation is deliberately coarse — any content mutation reported by
//! the platform clears every key.
//!
//! Behavior is controlled via `sentiero.toml`:
//!
//! ```toml
//! [cache]
//! enabled = true
//! news_ttl_secs = 1800
//! # ... see config.rs for all options
//! ```

mod config;
mod keys;
mod store;

pub use config::CacheConfig;
pub use keys::DocumentKey;
pub use store::DocumentStore;
