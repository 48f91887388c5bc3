//! linkwatch - track web links and collect their articles.
//!
//! Detects content changes on tracked links by fingerprint and turns RSS/Atom
//! feeds or plain HTML pages into one savable article list.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod watch;

pub use app::App;
pub use config::Config;
pub use error::{LinkwatchError, Result};
pub use watch::{
    AddResult, Article, ArticleStore, CheckReport, FileWatchService, LinkStore, TrackedLink,
    WatchService,
};
