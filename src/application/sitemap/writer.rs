//! Sitemap protocol serialization.
//!
//! Documents are assembled as strings, the same way the rest of the XML
//! surface is produced: every text node and URL passes through
//! [`escape_xml`], and every document starts with the XML declaration plus
//! the xml-stylesheet processing instruction pointing at the XSL path.

use std::borrow::Cow;
use std::fmt::Write;

use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

use crate::domain::sitemap::{IndexEntry, LastModified, SitemapEntry};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";
const VIDEO_NS: &str = "http://www.google.com/schemas/sitemap-video/1.1";
const NEWS_NS: &str = "http://www.google.com/schemas/sitemap-news/0.9";

const DAY_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Extension namespaces declared on a urlset document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extensions {
    pub image: bool,
    pub video: bool,
    pub news: bool,
}

impl Extensions {
    pub const IMAGE: Self = Self {
        image: true,
        video: false,
        news: false,
    };

    pub const NEWS_AND_IMAGE: Self = Self {
        image: true,
        video: false,
        news: true,
    };

    pub const VIDEO_AND_IMAGE: Self = Self {
        image: true,
        video: true,
        news: false,
    };
}

/// Escape a text node or URL for XML output.
pub fn escape_xml(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }
    let mut escaped = String::with_capacity(value.len() + 8);
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

fn document_prologue(xml: &mut String, stylesheet_href: &str) {
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        xml,
        "<?xml-stylesheet type=\"text/xsl\" href=\"{}\"?>",
        escape_xml(stylesheet_href)
    );
}

fn format_last_modified(stamp: LastModified) -> Option<String> {
    match stamp {
        LastModified::Day(day) => day.format(DAY_FORMAT).ok(),
        LastModified::Instant(instant) => instant.format(&Rfc3339).ok(),
    }
}

/// Render a urlset document with the requested extension namespaces.
pub fn render_urlset(
    entries: &[SitemapEntry],
    extensions: Extensions,
    stylesheet_href: &str,
) -> String {
    let mut xml = String::with_capacity(256 + entries.len() * 256);
    document_prologue(&mut xml, stylesheet_href);

    let _ = write!(xml, "<urlset xmlns=\"{SITEMAP_NS}\"");
    if extensions.news {
        let _ = write!(xml, "\n        xmlns:news=\"{NEWS_NS}\"");
    }
    if extensions.video {
        let _ = write!(xml, "\n        xmlns:video=\"{VIDEO_NS}\"");
    }
    if extensions.image {
        let _ = write!(xml, "\n        xmlns:image=\"{IMAGE_NS}\"");
    }
    xml.push_str(">\n");

    for entry in entries {
        render_entry(&mut xml, entry);
    }

    xml.push_str("</urlset>\n");
    xml
}

fn render_entry(xml: &mut String, entry: &SitemapEntry) {
    xml.push_str("<url>\n");
    let _ = writeln!(xml, "  <loc>{}</loc>", escape_xml(&entry.loc));

    if let Some(stamp) = entry.last_modified
        && let Some(formatted) = format_last_modified(stamp)
    {
        let _ = writeln!(xml, "  <lastmod>{formatted}</lastmod>");
    }
    if let Some(frequency) = entry.change_frequency {
        let _ = writeln!(xml, "  <changefreq>{frequency}</changefreq>");
    }
    if let Some(priority) = entry.priority.as_deref() {
        let _ = writeln!(xml, "  <priority>{}</priority>", escape_xml(priority));
    }

    if let Some(news) = entry.news.as_ref() {
        xml.push_str("  <news:news>\n");
        xml.push_str("    <news:publication>\n");
        let _ = writeln!(
            xml,
            "      <news:name>{}</news:name>",
            escape_xml(&news.publication_name)
        );
        let _ = writeln!(
            xml,
            "      <news:language>{}</news:language>",
            escape_xml(&news.publication_language)
        );
        xml.push_str("    </news:publication>\n");
        if let Ok(published) = news.published_at.format(&Rfc3339) {
            let _ = writeln!(
                xml,
                "    <news:publication_date>{published}</news:publication_date>"
            );
        }
        let _ = writeln!(xml, "    <news:title>{}</news:title>", escape_xml(&news.title));
        xml.push_str("  </news:news>\n");
    }

    for image in &entry.images {
        xml.push_str("  <image:image>\n");
        let _ = writeln!(xml, "    <image:loc>{}</image:loc>", escape_xml(&image.url));
        let _ = writeln!(
            xml,
            "    <image:title>{}</image:title>",
            escape_xml(&image.title)
        );
        if let Some(caption) = image.caption.as_deref() {
            let _ = writeln!(
                xml,
                "    <image:caption>{}</image:caption>",
                escape_xml(caption)
            );
        }
        xml.push_str("  </image:image>\n");
    }

    if let Some(video) = entry.video.as_ref() {
        xml.push_str("  <video:video>\n");
        let _ = writeln!(
            xml,
            "    <video:thumbnail_loc>{}</video:thumbnail_loc>",
            escape_xml(&video.thumbnail_url)
        );
        let _ = writeln!(
            xml,
            "    <video:title>{}</video:title>",
            escape_xml(&video.title)
        );
        let _ = writeln!(
            xml,
            "    <video:description>{}</video:description>",
            escape_xml(&video.description)
        );
        let _ = writeln!(
            xml,
            "    <video:content_loc>{}</video:content_loc>",
            escape_xml(&video.content_url)
        );
        if let Some(duration) = video.duration_seconds {
            let _ = writeln!(xml, "    <video:duration>{duration}</video:duration>");
        }
        if let Ok(published) = video.published_at.format(&Rfc3339) {
            let _ = writeln!(
                xml,
                "    <video:publication_date>{published}</video:publication_date>"
            );
        }
        xml.push_str("    <video:family_friendly>yes</video:family_friendly>\n");
        xml.push_str("  </video:video>\n");
    }

    xml.push_str("</url>\n");
}

/// Render the sitemapindex document.
pub fn render_index(entries: &[IndexEntry], stylesheet_href: &str) -> String {
    let mut xml = String::with_capacity(256 + entries.len() * 128);
    document_prologue(&mut xml, stylesheet_href);
    let _ = writeln!(xml, "<sitemapindex xmlns=\"{SITEMAP_NS}\">");

    for entry in entries {
        xml.push_str("<sitemap>\n");
        let _ = writeln!(xml, "  <loc>{}</loc>", escape_xml(&entry.loc));
        if let Ok(stamp) = entry.last_modified.format(&Rfc3339) {
            let _ = writeln!(xml, "  <lastmod>{stamp}</lastmod>");
        }
        xml.push_str("</sitemap>\n");
    }

    xml.push_str("</sitemapindex>\n");
    xml
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::domain::sitemap::{NewsAnnotation, SitemapImage, VideoAnnotation};
    use crate::domain::types::ChangeFrequency;

    #[test]
    fn escape_handles_reserved_characters() {
        assert_eq!(escape_xml("plain"), "plain");
        assert_eq!(
            escape_xml("a & b <c> \"d\" 'e'"),
            "a &amp; b &lt;c&gt; &quot;d&quot; &apos;e&apos;"
        );
    }

    #[test]
    fn urlset_carries_prologue_and_stylesheet() {
        let xml = render_urlset(&[], Extensions::default(), "/sitemap.xsl");
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
        assert!(xml.contains("<?xml-stylesheet type=\"text/xsl\" href=\"/sitemap.xsl\"?>"));
        assert!(xml.contains("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert!(xml.ends_with("</urlset>\n"));
    }

    #[test]
    fn entry_fields_render_in_protocol_shape() {
        let entry = SitemapEntry {
            loc: "https://example.test/about/".to_string(),
            last_modified: Some(LastModified::Day(datetime!(2024-05-02 10:00 UTC).date())),
            change_frequency: Some(ChangeFrequency::Monthly),
            priority: Some("0.6".to_string()),
            images: vec![SitemapImage {
                url: "https://example.test/media/about.jpg".to_string(),
                title: "About".to_string(),
                caption: Some("Team photo".to_string()),
            }],
            video: None,
            news: None,
        };
        let xml = render_urlset(&[entry], Extensions::IMAGE, "/sitemap.xsl");
        assert!(xml.contains("<loc>https://example.test/about/</loc>"));
        assert!(xml.contains("<lastmod>2024-05-02</lastmod>"));
        assert!(xml.contains("<changefreq>monthly</changefreq>"));
        assert!(xml.contains("<priority>0.6</priority>"));
        assert!(xml.contains("xmlns:image=\"http://www.google.com/schemas/sitemap-image/1.1\""));
        assert!(xml.contains("<image:caption>Team photo</image:caption>"));
    }

    #[test]
    fn news_block_renders_publication_and_date() {
        let entry = SitemapEntry {
            loc: "https://example.test/posts/breaking/".to_string(),
            news: Some(NewsAnnotation {
                publication_name: "Example Daily".to_string(),
                publication_language: "en".to_string(),
                title: "Breaking & entering".to_string(),
                published_at: datetime!(2024-05-02 10:30 UTC),
            }),
            ..SitemapEntry::default()
        };
        let xml = render_urlset(&[entry], Extensions::NEWS_AND_IMAGE, "/sitemap.xsl");
        assert!(xml.contains("xmlns:news=\"http://www.google.com/schemas/sitemap-news/0.9\""));
        assert!(xml.contains("<news:name>Example Daily</news:name>"));
        assert!(xml.contains("<news:language>en</news:language>"));
        assert!(xml.contains("<news:publication_date>2024-05-02T10:30:00Z</news:publication_date>"));
        assert!(xml.contains("<news:title>Breaking &amp; entering</news:title>"));
    }

    #[test]
    fn video_block_omits_absent_duration() {
        let entry = SitemapEntry {
            loc: "https://example.test/posts/demo/".to_string(),
            video: Some(VideoAnnotation {
                thumbnail_url: "https://example.test/media/demo.jpg".to_string(),
                title: "Demo".to_string(),
                description: "Walkthrough".to_string(),
                content_url: "https://example.test/media/demo.mp4".to_string(),
                duration_seconds: None,
                published_at: datetime!(2024-05-02 10:30 UTC),
            }),
            ..SitemapEntry::default()
        };
        let xml = render_urlset(&[entry], Extensions::VIDEO_AND_IMAGE, "/sitemap.xsl");
        assert!(xml.contains("<video:content_loc>https://example.test/media/demo.mp4</video:content_loc>"));
        assert!(!xml.contains("<video:duration>"));
        assert!(xml.contains("<video:family_friendly>yes</video:family_friendly>"));
    }

    #[test]
    fn index_renders_sitemap_references() {
        let entries = vec![IndexEntry {
            loc: "https://example.test/sitemap-post.xml".to_string(),
            last_modified: datetime!(2024-05-02 10:30 UTC),
        }];
        let xml = render_index(&entries, "/sitemap.xsl");
        assert!(xml.contains("<sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">"));
        assert!(xml.contains("<loc>https://example.test/sitemap-post.xml</loc>"));
        assert!(xml.contains("<lastmod>2024-05-02T10:30:00Z</lastmod>"));
        assert!(xml.ends_with("</sitemapindex>\n"));
    }
}
