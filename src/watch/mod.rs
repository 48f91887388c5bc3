//! Link watching and article collection.
//!
//! Tracks links, detects content changes by fingerprint, and turns feeds
//! or plain pages into a common article list that can be saved.

pub mod article_store;
pub mod checker;
pub mod feed;
pub mod fetcher;
pub mod fingerprint;
pub mod link_store;
pub mod scrape;
pub mod service;
pub mod source;
pub mod storage;
pub mod types;

pub use article_store::ArticleStore;
pub use checker::{
    check_updates, check_updates_with_clock, CheckOutcome, CheckReport, LinkCheck,
};
pub use feed::{FeedEntry, FeedPage};
pub use fetcher::{validate_url, Fetch, FetchedPage, HttpFetcher};
pub use fingerprint::fingerprint;
pub use link_store::LinkStore;
pub use service::{FileWatchService, WatchService};
pub use source::{collect_articles, ArticleSource, CollectedArticles, SourceOptions, SourceRouting};
pub use storage::{Document, FileDocument, MemoryDocument};
pub use types::{
    truncate_chars, AddResult, Article, LastUpdated, TrackedLink, DEFAULT_ARTICLE_TITLE,
    MAX_CONTENT_LENGTH, MAX_SNAPSHOT_LENGTH,
};
