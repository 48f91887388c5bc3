//! The "check for updates" pass over all tracked links.

use std::fmt;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::watch::fetcher::Fetch;
use crate::watch::fingerprint::fingerprint;
use crate::watch::link_store::LinkStore;
use crate::watch::storage::Document;
use crate::Result;

/// What happened to one link during a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Content changed; a snapshot was recorded.
    Updated,
    /// Content is identical to the last recorded fetch.
    Unchanged,
    /// The fetch failed; the link was left untouched.
    Failed(String),
}

/// Result of checking one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCheck {
    /// Checked URL.
    pub url: String,
    /// Outcome.
    pub outcome: CheckOutcome,
}

impl fmt::Display for LinkCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            CheckOutcome::Updated => write!(f, "Update found for {}", self.url),
            CheckOutcome::Unchanged => write!(f, "No updates for {}", self.url),
            CheckOutcome::Failed(e) => write!(f, "Failed to fetch {}: {}", self.url, e),
        }
    }
}

/// Per-link results of one pass, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// One entry per tracked link.
    pub checks: Vec<LinkCheck>,
}

impl CheckReport {
    /// Number of links whose content changed.
    pub fn updated_count(&self) -> usize {
        self.count(|o| matches!(o, CheckOutcome::Updated))
    }

    /// Number of links that could not be fetched.
    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, CheckOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&CheckOutcome) -> bool) -> usize {
        self.checks.iter().filter(|c| pred(&c.outcome)).count()
    }
}

/// Check every tracked link, stamping changes with the local time.
pub async fn check_updates<D, F>(store: &mut LinkStore<D>, fetcher: &F) -> Result<CheckReport>
where
    D: Document,
    F: Fetch,
{
    check_updates_with_clock(store, fetcher, || Local::now().naive_local()).await
}

/// Check every tracked link, stamping changes with `now()`.
///
/// Links are fetched one after another. A failed fetch is reported and
/// skipped. The store is persisted once, after every link was checked.
pub async fn check_updates_with_clock<D, F, C>(
    store: &mut LinkStore<D>,
    fetcher: &F,
    now: C,
) -> Result<CheckReport>
where
    D: Document,
    F: Fetch,
    C: Fn() -> NaiveDateTime,
{
    let mut report = CheckReport::default();

    for link in store.links_mut() {
        let outcome = match fetcher.fetch(&link.url).await {
            Ok(page) => {
                let content = page.text();
                let digest = fingerprint(&content);
                if link.is_unchanged(&digest) {
                    debug!("No updates for {}", link.url);
                    CheckOutcome::Unchanged
                } else {
                    info!("Update found for {}", link.url);
                    link.record_change(digest, &content, now());
                    CheckOutcome::Updated
                }
            }
            Err(e) => {
                warn!("Failed to fetch {}: {}", link.url, e);
                CheckOutcome::Failed(e.to_string())
            }
        };
        report.checks.push(LinkCheck {
            url: link.url.clone(),
            outcome,
        });
    }

    store.persist()?;
    Ok(report)
}
