//! Core types for link watching and article collection.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Maximum length of an article's content, in characters.
pub const MAX_CONTENT_LENGTH: usize = 200;

/// Maximum length of a stored update snapshot, in characters.
pub const MAX_SNAPSHOT_LENGTH: usize = 500;

/// Title used for feed entries that carry none.
pub const DEFAULT_ARTICLE_TITLE: &str = "No Title";

/// Persisted form of a timestamp that was never set.
pub const NEVER: &str = "Never";

/// Persisted timestamp format (local time).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Truncate `text` to at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// When a tracked link last changed.
///
/// Stored values that are neither [`NEVER`] nor in [`TIMESTAMP_FORMAT`] are
/// kept verbatim as [`LastUpdated::Other`] and written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LastUpdated {
    /// No change has been recorded yet.
    #[default]
    Never,
    /// Local time of the most recent recorded change.
    At(NaiveDateTime),
    /// A stored value in some other format.
    Other(String),
}

impl From<String> for LastUpdated {
    fn from(value: String) -> Self {
        if value == NEVER {
            return LastUpdated::Never;
        }
        match NaiveDateTime::parse_from_str(&value, TIMESTAMP_FORMAT) {
            Ok(at) => LastUpdated::At(at),
            Err(_) => LastUpdated::Other(value),
        }
    }
}

impl From<LastUpdated> for String {
    fn from(value: LastUpdated) -> Self {
        value.to_string()
    }
}

impl fmt::Display for LastUpdated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastUpdated::Never => f.write_str(NEVER),
            LastUpdated::At(at) => write!(f, "{}", at.format(TIMESTAMP_FORMAT)),
            LastUpdated::Other(raw) => f.write_str(raw),
        }
    }
}

/// A monitored URL plus its change-detection state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedLink {
    /// The tracked URL. Persisted as the map key, not inside the record.
    #[serde(skip)]
    pub url: String,
    /// Digest of the last fetched content; empty until the first fetch.
    #[serde(rename = "hash", default)]
    pub content_digest: String,
    /// Truncated content snapshots, oldest first.
    #[serde(rename = "updates", default)]
    pub update_history: Vec<String>,
    /// When the digest last changed.
    #[serde(default)]
    pub last_updated: LastUpdated,
}

impl TrackedLink {
    /// Create a link that has never been checked.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content_digest: String::new(),
            update_history: Vec::new(),
            last_updated: LastUpdated::Never,
        }
    }

    /// Whether `digest` matches the stored digest.
    pub fn is_unchanged(&self, digest: &str) -> bool {
        self.content_digest == digest
    }

    /// Record a content change: new digest, one more snapshot, new timestamp.
    pub fn record_change(&mut self, digest: String, content: &str, at: NaiveDateTime) {
        self.content_digest = digest;
        self.update_history
            .push(truncate_chars(content, MAX_SNAPSHOT_LENGTH));
        self.last_updated = LastUpdated::At(at);
    }
}

/// A normalized unit of readable content.
///
/// Two articles are the same article iff all three fields are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Article {
    /// Article title.
    pub title: String,
    /// Source URL.
    pub link: String,
    /// Body text, at most [`MAX_CONTENT_LENGTH`] characters.
    pub content: String,
}

impl Article {
    /// Create an article, truncating `content`.
    pub fn new(title: impl Into<String>, link: impl Into<String>, content: &str) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            content: truncate_chars(content, MAX_CONTENT_LENGTH),
        }
    }
}

/// Outcome of adding a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddResult {
    /// The link is now tracked.
    Added,
    /// The link was already tracked; nothing changed.
    AlreadyExists,
}
