use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::db::Repository;
use crate::error::{AppError, Result};
use crate::feed::{FeedClient, FeedItem};
use crate::models::{truncate_chars, NewOpinion, Opinion, Source, EXCERPT_CHARS};

use super::categorize;

/// Outcome of one crawl over many sources.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Newly stored opinions; URLs already on record are not repeated here.
    pub opinions: Vec<Opinion>,
    pub succeeded: usize,
    pub failed: usize,
    /// Items dropped because their canonical URL was already stored.
    pub skipped: usize,
}

pub struct Ingestor<F> {
    client: F,
    repository: Repository,
    fetch_timeout: Duration,
    items_per_source: usize,
    concurrency: usize,
}

impl<F: FeedClient> Ingestor<F> {
    pub fn new(client: F, repository: Repository, config: &Config) -> Self {
        Self {
            client,
            repository,
            fetch_timeout: config.feed_timeout(),
            items_per_source: config.items_per_source,
            concurrency: config.fetch_concurrency,
        }
    }

    /// Crawl one source. A failure is logged; opinions stored before it are
    /// still returned.
    pub async fn ingest(&self, source: &Source) -> Vec<Opinion> {
        let outcome = self.ingest_source(source).await;
        if let Some(e) = &outcome.error {
            warn!("Failed to ingest {}: {}", source.id, e);
        }
        outcome.opinions
    }

    /// Crawl every source independently. Completes even if all of them fail.
    pub async fn ingest_all(&self, sources: &[Source]) -> IngestReport {
        let results: Vec<_> = stream::iter(sources)
            .map(|source| async move { (source, self.ingest_source(source).await) })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut report = IngestReport::default();
        for (source, outcome) in results {
            match &outcome.error {
                None => {
                    debug!(
                        "Ingested {} new opinions from {} ({} already stored)",
                        outcome.opinions.len(),
                        source.id,
                        outcome.skipped
                    );
                    report.succeeded += 1;
                }
                Some(e) => {
                    warn!(
                        "Source unavailable {} after {} new opinions: {}",
                        source.id,
                        outcome.opinions.len(),
                        e
                    );
                    report.failed += 1;
                }
            }
            report.skipped += outcome.skipped;
            report.opinions.extend(outcome.opinions);
        }

        info!(
            "Ingest finished - sources_ok={}, sources_failed={}, new_opinions={}, skipped={}",
            report.succeeded,
            report.failed,
            report.opinions.len(),
            report.skipped
        );
        report
    }

    async fn ingest_source(&self, source: &Source) -> SourceOutcome {
        let mut outcome = SourceOutcome::default();
        let items = match self.fetch_items(source).await {
            Ok(items) => items,
            Err(e) => {
                outcome.error = Some(e);
                return outcome;
            }
        };

        for item in most_recent(items, self.items_per_source) {
            match self.store(opinion_from_item(source, item)).await {
                Ok(Some(opinion)) => outcome.opinions.push(opinion),
                Ok(None) => outcome.skipped += 1,
                Err(e) => {
                    outcome.error = Some(e);
                    break;
                }
            }
        }
        outcome
    }

    async fn fetch_items(&self, source: &Source) -> Result<Vec<FeedItem>> {
        let Some(feed_url) = source.feed_url.as_deref() else {
            debug!("Source {} has no feed, skipping", source.id);
            return Ok(Vec::new());
        };

        tokio::time::timeout(self.fetch_timeout, self.client.fetch(feed_url))
            .await
            .map_err(|_| AppError::Timeout(format!("feed {}", feed_url)))?
    }

    /// `None` when the canonical URL is already stored.
    async fn store(&self, opinion: NewOpinion) -> Result<Option<Opinion>> {
        if self.repository.opinion_exists(&opinion.url).await? {
            return Ok(None);
        }
        self.repository.insert_opinion(opinion).await
    }
}

/// What one source contributed. Opinions stored before an error are kept.
#[derive(Default)]
struct SourceOutcome {
    opinions: Vec<Opinion>,
    skipped: usize,
    error: Option<AppError>,
}

/// Keep the `limit` newest items. Undated items sort after dated ones and
/// otherwise keep feed order.
fn most_recent(mut items: Vec<FeedItem>, limit: usize) -> Vec<FeedItem> {
    items.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    items.truncate(limit);
    items
}

fn opinion_from_item(source: &Source, item: FeedItem) -> NewOpinion {
    let title = item.title.unwrap_or_else(|| "Untitled".to_string());
    let content = item
        .content
        .clone()
        .or_else(|| item.snippet.clone())
        .unwrap_or_default();
    let excerpt = item
        .snippet
        .as_deref()
        .or(item.content.as_deref())
        .map(|text| truncate_chars(text, EXCERPT_CHARS))
        .filter(|e| !e.is_empty());
    let category = categorize(&title, &content);

    NewOpinion {
        source_id: source.id.clone(),
        url: canonical_url(item.link.as_deref(), &source.url),
        title,
        author: item.author,
        content,
        excerpt,
        published_at: item.published_at,
        category,
    }
}

/// Normalize an item link (trimmed, fragment dropped); items without one fall
/// back to the source's base URL.
pub fn canonical_url(link: Option<&str>, fallback: &str) -> String {
    let raw = link.map(str::trim).filter(|l| !l.is_empty()).unwrap_or(fallback);
    match url::Url::parse(raw) {
        Ok(mut parsed) => {
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => raw.trim().to_string(),
    }
}
