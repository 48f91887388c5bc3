//! Persisted collection of saved articles.

use crate::watch::storage::{load_json, save_json, Document};
use crate::watch::types::Article;
use crate::Result;

/// Ordered set of saved articles, backed by a [`Document`].
///
/// Order is save order. Membership uses full-field equality of
/// [`Article`], so there is never more than one copy of an article.
#[derive(Debug)]
pub struct ArticleStore<D: Document> {
    doc: D,
    articles: Vec<Article>,
}

impl<D: Document> ArticleStore<D> {
    /// Load the collection from `doc`.
    ///
    /// Missing or unreadable storage yields an empty store.
    pub fn load(doc: D) -> Self {
        let articles = load_json(&doc);
        Self { doc, articles }
    }

    /// Replace the in-memory collection with what is currently stored.
    pub fn reload(&mut self) {
        self.articles = load_json(&self.doc);
    }

    /// Saved articles in save order.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Whether `article` is saved.
    pub fn contains(&self, article: &Article) -> bool {
        self.articles.contains(article)
    }

    /// Save `article` if it is not saved, otherwise remove it.
    ///
    /// Returns whether the article is saved afterwards. Storage is not
    /// touched; call [`ArticleStore::persist`] to write the change.
    pub fn toggle(&mut self, article: &Article) -> bool {
        match self.articles.iter().position(|a| a == article) {
            Some(idx) => {
                self.articles.remove(idx);
                false
            }
            None => {
                self.articles.push(article.clone());
                true
            }
        }
    }

    /// Number of saved articles.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Whether nothing is saved.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Overwrite storage with the full ordered collection.
    pub fn persist(&self) -> Result<()> {
        save_json(&self.doc, &self.articles)
    }
}
