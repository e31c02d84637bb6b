//! Static presentation assets for the sitemap surface.

pub mod stylesheet;
