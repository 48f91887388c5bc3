//! Article collection for a tracked link.
//!
//! A link is read either as a (possibly paginated) feed or, failing that,
//! by scraping headings and paragraphs from the page. Failures never
//! propagate: they are logged and shrink the result.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::SourcesConfig;
use crate::watch::feed::{self, FeedEntry, FeedPage};
use crate::watch::fetcher::{Fetch, FetchedPage};
use crate::watch::scrape;
use crate::watch::types::Article;
use crate::Result;

/// URL fragment that marks a feed under [`SourceRouting::UrlHint`].
const FEED_URL_HINT: &str = "rss";

/// How a link is routed to the feed reader or the scraper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceRouting {
    /// Fetch once and read it as a feed if it parses as one, otherwise
    /// scrape the same response.
    #[default]
    Probe,
    /// Treat URLs containing "rss" as feeds and scrape everything else.
    ///
    /// A page whose path merely mentions "rss" is misrouted.
    UrlHint,
}

/// Which variant produced a set of articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleSource {
    /// Entries of a feed, across all followed pages.
    Feed,
    /// Headings and paragraphs scraped from an HTML page.
    Scrape,
    /// The link could not be fetched at all.
    Unavailable,
}

/// Articles collected from one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectedArticles {
    /// Variant that produced the articles.
    pub source: ArticleSource,
    /// Articles in feed order or document order.
    pub articles: Vec<Article>,
}

impl CollectedArticles {
    fn new(source: ArticleSource, articles: Vec<Article>) -> Self {
        Self { source, articles }
    }
}

/// Limits and routing for article collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOptions {
    /// Routing rule.
    pub routing: SourceRouting,
    /// Hard cap on feed pages followed in one call.
    pub max_feed_pages: usize,
    /// Maximum number of scraped elements.
    pub max_scraped_elements: usize,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self::from(&SourcesConfig::default())
    }
}

impl From<&SourcesConfig> for SourceOptions {
    fn from(config: &SourcesConfig) -> Self {
        Self {
            routing: config.routing,
            max_feed_pages: config.max_feed_pages.max(1),
            max_scraped_elements: config.max_scraped_elements,
        }
    }
}

/// Collect the articles behind `url`.
pub async fn collect_articles<F: Fetch>(
    fetcher: &F,
    url: &str,
    options: &SourceOptions,
) -> CollectedArticles {
    match options.routing {
        SourceRouting::Probe => probe(fetcher, url, options).await,
        SourceRouting::UrlHint if url.contains(FEED_URL_HINT) => {
            debug!("Reading {} as a feed (URL hint)", url);
            let articles = read_feed(fetcher, url, None, options.max_feed_pages).await;
            CollectedArticles::new(ArticleSource::Feed, articles)
        }
        SourceRouting::UrlHint => {
            debug!("Scraping {} (URL hint)", url);
            match fetcher.fetch(url).await {
                Ok(page) => CollectedArticles::new(
                    ArticleSource::Scrape,
                    scrape_page(&page, options.max_scraped_elements),
                ),
                Err(e) => {
                    warn!("Failed to scrape website {}: {}", url, e);
                    CollectedArticles::new(ArticleSource::Scrape, Vec::new())
                }
            }
        }
    }
}

/// Fetch once, then decide between feed and scrape from the response.
async fn probe<F: Fetch>(fetcher: &F, url: &str, options: &SourceOptions) -> CollectedArticles {
    let page = match fetcher.fetch(url).await {
        Ok(page) => page,
        Err(e) => {
            warn!("Failed to fetch {}: {}", url, e);
            return CollectedArticles::new(ArticleSource::Unavailable, Vec::new());
        }
    };

    match feed::parse_page(&page.body, url) {
        Ok(first) if first.looks_like_feed() => {
            debug!("{} is a feed", url);
            let articles = read_feed(fetcher, url, Some(first), options.max_feed_pages).await;
            CollectedArticles::new(ArticleSource::Feed, articles)
        }
        _ => {
            debug!("{} is not a feed, scraping", url);
            CollectedArticles::new(
                ArticleSource::Scrape,
                scrape_page(&page, options.max_scraped_elements),
            )
        }
    }
}

/// Read a feed starting at `url`, following next-page references.
///
/// `first` is used instead of fetching `url` when the first page is
/// already parsed. Stops at a page without a next reference, at a page
/// that fails to load, at a revisited URL, or after `max_pages` pages.
async fn read_feed<F: Fetch>(
    fetcher: &F,
    url: &str,
    first: Option<FeedPage>,
    max_pages: usize,
) -> Vec<Article> {
    let mut articles = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut current = Some((url.to_string(), first));

    while let Some((page_url, preloaded)) = current.take() {
        if visited.len() >= max_pages {
            warn!(
                "Stopped reading {} after {} pages; more pages are declared",
                url, max_pages
            );
            break;
        }
        if !visited.insert(page_url.clone()) {
            warn!("Feed {} links back to {}; stopping", url, page_url);
            break;
        }

        let page = match preloaded {
            Some(page) => page,
            None => match load_feed_page(fetcher, &page_url).await {
                Ok(page) => page,
                Err(e) => {
                    warn!("Failed to read feed page {}: {}", page_url, e);
                    break;
                }
            },
        };

        debug!(
            "Feed page {}: {} entries, next page: {}",
            page_url,
            page.entries.len(),
            page.next_page.as_deref().unwrap_or("none")
        );
        articles.extend(page.entries.into_iter().map(FeedEntry::into_article));
        current = page.next_page.map(|next| (next, None));
    }

    articles
}

async fn load_feed_page<F: Fetch>(fetcher: &F, url: &str) -> Result<FeedPage> {
    let page = fetcher.fetch(url).await?;
    feed::parse_page(&page.body, url)
}

fn scrape_page(page: &FetchedPage, limit: usize) -> Vec<Article> {
    match scrape::extract_articles(&page.text(), &page.url, limit) {
        Ok(articles) => articles,
        Err(e) => {
            warn!("Failed to scrape website {}: {}", page.url, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LinkwatchError;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Serves fixed bodies and records requested URLs.
    #[derive(Default)]
    struct FakeFetcher {
        pages: HashMap<String, String>,
        requests: RefCell<Vec<String>>,
    }

    impl FakeFetcher {
        fn with(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }
    }

    impl Fetch for FakeFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedPage> {
            self.requests.borrow_mut().push(url.to_string());
            self.pages
                .get(url)
                .map(|body| FetchedPage::new(url, body.as_bytes().to_vec()))
                .ok_or_else(|| LinkwatchError::Fetch(format!("no route to {url}")))
        }
    }

    fn atom_page(entries: &[&str], next: Option<&str>) -> String {
        let next = next
            .map(|href| format!(r#"<link rel="next" href="{href}"/>"#))
            .unwrap_or_default();
        let entries: String = entries
            .iter()
            .map(|title| {
                format!(
                    "<entry><id>urn:{title}</id><title>{title}</title>\
                     <updated>2025-01-01T00:00:00Z</updated>\
                     <link href=\"https://example.com/{title}\"/>\
                     <summary>About {title}</summary></entry>"
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
<title>Paged</title><id>urn:feed</id><updated>2025-01-01T00:00:00Z</updated>
{next}{entries}
</feed>"#
        )
    }

    fn titles(collected: &CollectedArticles) -> Vec<&str> {
        collected.articles.iter().map(|a| a.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_probe_reads_feed_across_pages() {
        let fetcher = FakeFetcher::default()
            .with(
                "https://example.com/feed",
                &atom_page(&["a", "b"], Some("https://example.com/feed?p=2")),
            )
            .with(
                "https://example.com/feed?p=2",
                &atom_page(&["c"], Some("https://example.com/feed?p=3")),
            )
            .with("https://example.com/feed?p=3", &atom_page(&["d"], None));

        let collected =
            collect_articles(&fetcher, "https://example.com/feed", &SourceOptions::default())
                .await;

        assert_eq!(collected.source, ArticleSource::Feed);
        assert_eq!(titles(&collected), vec!["a", "b", "c", "d"]);
        assert_eq!(collected.articles[0].content, "About a");
        // The first page is fetched once, not once for probing and again for reading
        assert_eq!(fetcher.requests.borrow().len(), 3);
    }

    #[tokio::test]
    async fn test_probe_falls_back_to_scrape() {
        let fetcher = FakeFetcher::default().with(
            "https://example.com/rss-news",
            "<html><body><h1>Headline</h1><p>Body</p></body></html>",
        );

        let collected = collect_articles(
            &fetcher,
            "https://example.com/rss-news",
            &SourceOptions::default(),
        )
        .await;

        assert_eq!(collected.source, ArticleSource::Scrape);
        assert_eq!(titles(&collected), vec!["Headline", "Body"]);
        assert!(collected
            .articles
            .iter()
            .all(|a| a.link == "https://example.com/rss-news"));
        assert_eq!(fetcher.requests.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_probe_fetch_failure_is_empty() {
        let fetcher = FakeFetcher::default();
        let collected =
            collect_articles(&fetcher, "https://example.com", &SourceOptions::default()).await;
        assert_eq!(collected.source, ArticleSource::Unavailable);
        assert!(collected.articles.is_empty());
    }

    #[tokio::test]
    async fn test_feed_page_failure_keeps_earlier_entries() {
        let fetcher = FakeFetcher::default()
            .with(
                "https://example.com/feed",
                &atom_page(&["a"], Some("https://example.com/feed?p=2")),
            )
            .with("https://example.com/feed?p=2", "not a feed at all");

        let collected =
            collect_articles(&fetcher, "https://example.com/feed", &SourceOptions::default())
                .await;
        assert_eq!(titles(&collected), vec!["a"]);
    }

    #[tokio::test]
    async fn test_feed_page_cap() {
        let mut fetcher = FakeFetcher::default();
        for n in 0..10 {
            let url = format!("https://example.com/feed?p={n}");
            let next = format!("https://example.com/feed?p={}", n + 1);
            fetcher = fetcher.with(&url, &atom_page(&[&format!("e{n}")], Some(&next)));
        }
        let options = SourceOptions {
            max_feed_pages: 4,
            ..SourceOptions::default()
        };

        let collected = collect_articles(&fetcher, "https://example.com/feed?p=0", &options).await;
        assert_eq!(titles(&collected), vec!["e0", "e1", "e2", "e3"]);
        assert_eq!(fetcher.requests.borrow().len(), 4);
    }

    #[tokio::test]
    async fn test_feed_self_reference_terminates() {
        let fetcher = FakeFetcher::default().with(
            "https://example.com/feed",
            &atom_page(&["a"], Some("https://example.com/feed")),
        );

        let collected =
            collect_articles(&fetcher, "https://example.com/feed", &SourceOptions::default())
                .await;
        assert_eq!(titles(&collected), vec!["a"]);
        assert_eq!(fetcher.requests.borrow().len(), 1);
    }

    #[tokio::test]
    async fn test_url_hint_routes_by_substring() {
        let fetcher = FakeFetcher::default()
            .with("https://example.com/rss", &atom_page(&["x"], None))
            .with("https://example.com/page", "<p>Para</p>");
        let options = SourceOptions {
            routing: SourceRouting::UrlHint,
            ..SourceOptions::default()
        };

        let feed = collect_articles(&fetcher, "https://example.com/rss", &options).await;
        assert_eq!(feed.source, ArticleSource::Feed);
        assert_eq!(titles(&feed), vec!["x"]);

        let page = collect_articles(&fetcher, "https://example.com/page", &options).await;
        assert_eq!(page.source, ArticleSource::Scrape);
        assert_eq!(titles(&page), vec!["Para"]);
    }

    #[tokio::test]
    async fn test_url_hint_misroutes_html_with_rss_in_path() {
        let fetcher =
            FakeFetcher::default().with("https://example.com/rss-guide", "<p>Guide</p>");
        let options = SourceOptions {
            routing: SourceRouting::UrlHint,
            ..SourceOptions::default()
        };

        let collected = collect_articles(&fetcher, "https://example.com/rss-guide", &options).await;
        assert_eq!(collected.source, ArticleSource::Feed);
        assert!(collected.articles.is_empty());
    }

    #[test]
    fn test_source_options_from_config() {
        let config = SourcesConfig {
            routing: SourceRouting::UrlHint,
            max_feed_pages: 0,
            max_scraped_elements: 12,
        };
        let options = SourceOptions::from(&config);
        assert_eq!(options.routing, SourceRouting::UrlHint);
        assert_eq!(options.max_feed_pages, 1);
        assert_eq!(options.max_scraped_elements, 12);
    }
}
