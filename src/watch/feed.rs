//! Feed page parsing.
//!
//! Wraps feed-rs so the rest of the core only sees entries plus an
//! optional next-page reference.

use feed_rs::parser;

use crate::watch::types::{Article, DEFAULT_ARTICLE_TITLE};
use crate::{LinkwatchError, Result};

/// Link relation that marks the next page of a paginated feed.
const NEXT_REL: &str = "next";

/// One feed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedEntry {
    /// Entry title, or "No Title".
    pub title: String,
    /// Entry link, or empty.
    pub link: String,
    /// Entry summary, or empty.
    pub summary: String,
}

impl FeedEntry {
    /// Convert to an article, truncating the summary.
    pub fn into_article(self) -> Article {
        Article::new(self.title, self.link, &self.summary)
    }
}

/// A single parsed page of a feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedPage {
    /// Entries in document order.
    pub entries: Vec<FeedEntry>,
    /// Absolute URL of the next page, if the feed declares one.
    pub next_page: Option<String>,
    /// Whether the feed declares a title, description or link.
    pub has_metadata: bool,
}

impl FeedPage {
    /// Whether this page is a usable feed rather than an unrelated XML
    /// document.
    pub fn looks_like_feed(&self) -> bool {
        !self.entries.is_empty() || self.has_metadata
    }
}

/// Parse feed bytes fetched from `page_url`.
///
/// A relative next-page reference is resolved against `page_url`.
pub fn parse_page(bytes: &[u8], page_url: &str) -> Result<FeedPage> {
    let feed = parser::parse(bytes)
        .map_err(|e| LinkwatchError::Parse(format!("failed to parse feed: {}", e)))?;

    let has_metadata =
        feed.title.is_some() || feed.description.is_some() || !feed.links.is_empty();

    let next_page = feed
        .links
        .iter()
        .find(|l| l.rel.as_deref() == Some(NEXT_REL))
        .and_then(|l| resolve(page_url, &l.href));

    let entries = feed
        .entries
        .into_iter()
        .map(|entry| FeedEntry {
            title: entry
                .title
                .map(|t| t.content)
                .unwrap_or_else(|| DEFAULT_ARTICLE_TITLE.to_string()),
            link: entry
                .links
                .into_iter()
                .next()
                .map(|l| l.href)
                .unwrap_or_default(),
            summary: entry.summary.map(|t| t.content).unwrap_or_default(),
        })
        .collect();

    Ok(FeedPage {
        entries,
        next_page,
        has_metadata,
    })
}

/// Resolve `href` against `base`. Falls back to `href` as-is when `base`
/// is not a URL.
fn resolve(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    match url::Url::parse(base) {
        Ok(base) => base.join(href).ok().map(String::from),
        Err(_) => Some(href.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::watch::types::MAX_CONTENT_LENGTH;

    #[test]
    fn test_parse_rss_entries() {
        let rss = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Feed</title>
    <link>https://example.com</link>
    <description>A test feed</description>
    <item>
      <title>First Article</title>
      <link>https://example.com/1</link>
      <description>First summary</description>
    </item>
    <item>
      <title>Second Article</title>
      <link>https://example.com/2</link>
    </item>
  </channel>
</rss>"#;

        let page = parse_page(rss.as_bytes(), "https://example.com/rss").unwrap();
        assert!(page.has_metadata);
        assert!(page.next_page.is_none());
        assert_eq!(page.entries.len(), 2);
        assert_eq!(page.entries[0].title, "First Article");
        assert_eq!(page.entries[0].link, "https://example.com/1");
        assert_eq!(page.entries[0].summary, "First summary");
        assert_eq!(page.entries[1].summary, "");
    }

    #[test]
    fn test_parse_missing_fields_use_defaults() {
        let rss = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <item>
      <guid>1</guid>
    </item>
  </channel>
</rss>"#;

        let page = parse_page(rss.as_bytes(), "https://example.com/rss").unwrap();
        assert_eq!(page.entries.len(), 1);
        assert_eq!(page.entries[0].title, "No Title");
        assert_eq!(page.entries[0].link, "");
        assert_eq!(page.entries[0].summary, "");
    }

    #[test]
    fn test_parse_atom_next_page_relative() {
        let atom = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Paged Feed</title>
  <id>urn:feed</id>
  <updated>2025-01-01T00:00:00Z</updated>
  <link rel="next" href="/feed?page=2"/>
  <entry>
    <id>urn:1</id>
    <title>Entry One</title>
    <updated>2025-01-01T00:00:00Z</updated>
    <link href="https://example.com/one"/>
    <summary>One</summary>
  </entry>
</feed>"#;

        let page = parse_page(atom.as_bytes(), "https://example.com/feed").unwrap();
        assert_eq!(
            page.next_page.as_deref(),
            Some("https://example.com/feed?page=2")
        );
        assert_eq!(page.entries[0].title, "Entry One");
        assert_eq!(page.entries[0].link, "https://example.com/one");
    }

    #[test]
    fn test_parse_invalid_is_error() {
        let result = parse_page(b"This is not XML", "https://example.com");
        assert!(matches!(result, Err(LinkwatchError::Parse(_))));
    }

    #[test]
    fn test_parse_html_is_error() {
        let html = b"<html><body><h1>Hello</h1></body></html>";
        assert!(parse_page(html, "https://example.com").is_err());
    }

    #[test]
    fn test_into_article_truncates_summary() {
        let entry = FeedEntry {
            title: "T".to_string(),
            link: "https://example.com".to_string(),
            summary: "s".repeat(MAX_CONTENT_LENGTH + 1),
        };
        let article = entry.into_article();
        assert_eq!(article.content.chars().count(), MAX_CONTENT_LENGTH);
    }

    #[test]
    fn test_looks_like_feed() {
        assert!(!FeedPage::default().looks_like_feed());
        let with_meta = FeedPage {
            has_metadata: true,
            ..FeedPage::default()
        };
        assert!(with_meta.looks_like_feed());
    }

    #[test]
    fn test_resolve() {
        assert_eq!(
            resolve("https://example.com/a/b", "c").as_deref(),
            Some("https://example.com/a/c")
        );
        assert_eq!(
            resolve("https://example.com/", "https://other.example/x").as_deref(),
            Some("https://other.example/x")
        );
        assert_eq!(resolve("https://example.com/", "  "), None);
    }
}
