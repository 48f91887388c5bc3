//! Persisted collection of tracked links.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::watch::storage::{load_json, save_json, Document};
use crate::watch::types::{AddResult, TrackedLink};
use crate::Result;

/// Mapping from URL to [`TrackedLink`], backed by a [`Document`].
///
/// Iteration order is URL order.
#[derive(Debug)]
pub struct LinkStore<D: Document> {
    doc: D,
    links: BTreeMap<String, TrackedLink>,
}

impl<D: Document> LinkStore<D> {
    /// Load the collection from `doc`.
    ///
    /// Missing or unreadable storage yields an empty store.
    pub fn load(doc: D) -> Self {
        let links = read_links(&doc);
        Self { doc, links }
    }

    /// Replace the in-memory collection with what is currently stored.
    pub fn reload(&mut self) {
        self.links = read_links(&self.doc);
    }

    /// Start tracking `url`.
    ///
    /// A URL that is already tracked is left untouched and reported as
    /// [`AddResult::AlreadyExists`]. A new link is persisted before this
    /// returns; if that write fails the link is not kept.
    pub fn add(&mut self, url: &str) -> Result<AddResult> {
        if self.links.contains_key(url) {
            debug!("Link already tracked: {}", url);
            return Ok(AddResult::AlreadyExists);
        }

        self.links.insert(url.to_string(), TrackedLink::new(url));
        if let Err(e) = self.persist() {
            self.links.remove(url);
            return Err(e);
        }

        info!("Tracking new link: {}", url);
        Ok(AddResult::Added)
    }

    /// Get a tracked link by URL.
    pub fn get(&self, url: &str) -> Option<&TrackedLink> {
        self.links.get(url)
    }

    /// Iterate over all tracked links.
    pub fn links(&self) -> impl Iterator<Item = &TrackedLink> {
        self.links.values()
    }

    /// Iterate over all tracked links for modification, in URL order.
    pub fn links_mut(&mut self) -> impl Iterator<Item = &mut TrackedLink> {
        self.links.values_mut()
    }

    /// All tracked URLs, in iteration order.
    pub fn urls(&self) -> Vec<String> {
        self.links.keys().cloned().collect()
    }

    /// Number of tracked links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether no links are tracked.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Write the whole collection to storage.
    pub fn persist(&self) -> Result<()> {
        save_json(&self.doc, &self.links)
    }
}

fn read_links<D: Document>(doc: &D) -> BTreeMap<String, TrackedLink> {
    let mut links: BTreeMap<String, TrackedLink> = load_json(doc);
    for (url, link) in links.iter_mut() {
        link.url = url.clone();
    }
    links
}
