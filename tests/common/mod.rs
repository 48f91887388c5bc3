//! Test helpers for integration tests.
//!
//! Provides a scripted fetcher and feed/page builders.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime};

use linkwatch::watch::{Fetch, FetchedPage};
use linkwatch::{LinkwatchError, Result};

/// Fetcher whose responses can be changed between calls.
#[derive(Default)]
pub struct ScriptedFetcher {
    responses: Mutex<HashMap<String, std::result::Result<String, String>>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url` from now on.
    pub fn set_body(&self, url: &str, body: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Ok(body.into()));
    }

    /// Fail every fetch of `url` from now on.
    pub fn set_failure(&self, url: &str, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Err(message.to_string()));
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Fetch for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        self.requests.lock().unwrap().push(url.to_string());
        match self.responses.lock().unwrap().get(url) {
            Some(Ok(body)) => Ok(FetchedPage::new(url, body.as_bytes().to_vec())),
            Some(Err(message)) => Err(LinkwatchError::Fetch(message.clone())),
            None => Err(LinkwatchError::Fetch(format!("no route to {url}"))),
        }
    }
}

/// A fixed local time for deterministic timestamps.
pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 14)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

/// RSS 2.0 document with one item per title.
pub fn rss_page(titles: &[String]) -> String {
    let items: String = titles
        .iter()
        .map(|title| {
            format!(
                "<item><title>{title}</title><link>https://example.com/{title}</link>\
                 <description>Summary of {title}</description></item>"
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>Feed</title><link>https://example.com</link>
<description>Test feed</description>{items}</channel></rss>"#
    )
}

/// Atom document with one entry per title and an optional next page.
pub fn atom_page(titles: &[String], next: Option<&str>) -> String {
    let next = next
        .map(|href| format!(r#"<link rel="next" href="{href}"/>"#))
        .unwrap_or_default();
    let entries: String = titles
        .iter()
        .map(|title| {
            format!(
                "<entry><id>urn:{title}</id><title>{title}</title>\
                 <updated>2025-01-01T00:00:00Z</updated>\
                 <link href=\"https://example.com/{title}\"/>\
                 <summary>Summary of {title}</summary></entry>"
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom"><title>Feed</title><id>urn:feed</id>
<updated>2025-01-01T00:00:00Z</updated>{next}{entries}</feed>"#
    )
}

/// HTML page with `count` paragraphs named "Item 0", "Item 1", ...
pub fn html_paragraphs(count: usize) -> String {
    let body: String = (0..count).map(|i| format!("<p>Item {i}</p>\n")).collect();
    format!("<html><head><title>Page</title></head><body>{body}</body></html>")
}
