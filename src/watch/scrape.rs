//! Article extraction from plain HTML pages.

use scraper::{ElementRef, Html, Selector};

use crate::watch::types::Article;
use crate::{LinkwatchError, Result};

/// Elements that become articles, matched in document order.
const ARTICLE_ELEMENTS: &str = "h1, h2, h3, p";

/// Extract up to `limit` articles from an HTML document fetched from `url`.
///
/// Every heading (levels 1-3) and paragraph becomes one article whose
/// title and content are the element's text. Each article links back to
/// `url`.
pub fn extract_articles(html: &str, url: &str, limit: usize) -> Result<Vec<Article>> {
    let selector = Selector::parse(ARTICLE_ELEMENTS)
        .map_err(|e| LinkwatchError::Parse(format!("invalid selector: {:?}", e)))?;
    let document = Html::parse_document(html);

    let articles = document
        .select(&selector)
        .take(limit)
        .map(|element| {
            let text = visible_text(element);
            Article::new(text.clone(), url, &text)
        })
        .collect();

    Ok(articles)
}

/// Element text with whitespace runs collapsed and the ends trimmed.
fn visible_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<&str>>().join(" ")
}
