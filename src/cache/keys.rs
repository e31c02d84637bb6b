//! Cache key definitions for the sitemap document set.

use crate::domain::sitemap::SitemapKind;

/// Identifies one cached sitemap document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKey {
    Index,
    Kind(SitemapKind),
    News,
    Video,
}

impl DocumentKey {
    /// Stable label for logging and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKey::Index => "index",
            DocumentKey::Kind(SitemapKind::Homepage) => "homepage",
            DocumentKey::Kind(SitemapKind::Post) => "post",
            DocumentKey::Kind(SitemapKind::Page) => "page",
            DocumentKey::Kind(SitemapKind::Product) => "product",
            DocumentKey::Kind(SitemapKind::Category) => "category",
            DocumentKey::Kind(SitemapKind::ProductCategory) => "product_cat",
            DocumentKey::News => "news",
            DocumentKey::Video => "video",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_distinct() {
        let keys = [
            DocumentKey::Index,
            DocumentKey::Kind(SitemapKind::Homepage),
            DocumentKey::Kind(SitemapKind::Post),
            DocumentKey::Kind(SitemapKind::Page),
            DocumentKey::Kind(SitemapKind::Product),
            DocumentKey::Kind(SitemapKind::Category),
            DocumentKey::Kind(SitemapKind::ProductCategory),
            DocumentKey::News,
            DocumentKey::Video,
        ];
        let mut labels: Vec<_> = keys.iter().map(DocumentKey::label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), keys.len());
    }
}
