//! High-level commands over both stores.
//!
//! Each command reloads the store it touches from storage, applies its
//! change, and persists before returning.

use tracing::info;

use crate::config::Config;
use crate::watch::article_store::ArticleStore;
use crate::watch::checker::{self, CheckReport};
use crate::watch::fetcher::{Fetch, HttpFetcher};
use crate::watch::link_store::LinkStore;
use crate::watch::source::{self, CollectedArticles, SourceOptions};
use crate::watch::storage::{Document, FileDocument};
use crate::watch::types::{AddResult, Article, TrackedLink};
use crate::Result;

/// Service wired to files on disk and a real HTTP client.
pub type FileWatchService = WatchService<FileDocument, FileDocument, HttpFetcher>;

/// Commands the presentation layer issues against the core.
pub struct WatchService<L: Document, A: Document, F: Fetch> {
    links: LinkStore<L>,
    saved: ArticleStore<A>,
    fetcher: F,
    options: SourceOptions,
}

impl FileWatchService {
    /// Build a service from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.fetch)?;
        Ok(Self::new(
            FileDocument::new(&config.storage.links_file),
            FileDocument::new(&config.storage.articles_file),
            fetcher,
            SourceOptions::from(&config.sources),
        ))
    }
}

impl<L: Document, A: Document, F: Fetch> WatchService<L, A, F> {
    /// Create a service over the given storage and fetcher.
    pub fn new(links_doc: L, articles_doc: A, fetcher: F, options: SourceOptions) -> Self {
        Self {
            links: LinkStore::load(links_doc),
            saved: ArticleStore::load(articles_doc),
            fetcher,
            options,
        }
    }

    /// Start tracking `url`.
    pub fn add_link(&mut self, url: &str) -> Result<AddResult> {
        self.links.reload();
        self.links.add(url)
    }

    /// Run one check pass over every tracked link.
    pub async fn check_updates(&mut self) -> Result<CheckReport> {
        self.links.reload();
        checker::check_updates(&mut self.links, &self.fetcher).await
    }

    /// All tracked links.
    pub fn tracked_links(&mut self) -> Vec<TrackedLink> {
        self.links.reload();
        self.links.links().cloned().collect()
    }

    /// Collect the articles currently behind `url`.
    pub async fn articles_for(&self, url: &str) -> CollectedArticles {
        source::collect_articles(&self.fetcher, url, &self.options).await
    }

    /// Saved articles in save order.
    pub fn saved_articles(&mut self) -> Vec<Article> {
        self.saved.reload();
        self.saved.articles().to_vec()
    }

    /// Whether `article` is saved.
    pub fn is_saved(&self, article: &Article) -> bool {
        self.saved.contains(article)
    }

    /// Save `article`, or unsave it if already saved.
    ///
    /// Returns whether the article is saved afterwards. If the write fails
    /// the toggle is undone and the error returned.
    pub fn toggle_saved(&mut self, article: &Article) -> Result<bool> {
        self.saved.reload();
        let saved = self.saved.toggle(article);
        if let Err(e) = self.saved.persist() {
            self.saved.toggle(article);
            return Err(e);
        }

        if saved {
            info!("Saved article: {}", article.title);
        } else {
            info!("Removed saved article: {}", article.title);
        }
        Ok(saved)
    }
}
