use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use feed_rs::model::Entry;
use feed_rs::parser;
use reqwest::{redirect, Client};

use crate::config::Config;
use crate::error::Result;

/// One feed entry, flattened to what the ingestor needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedItem {
    pub title: Option<String>,
    pub author: Option<String>,
    pub link: Option<String>,
    /// Plain-text body, HTML already stripped.
    pub content: Option<String>,
    /// Plain-text snippet/summary, HTML already stripped.
    pub snippet: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Anything that can turn a feed location into items.
pub trait FeedClient: Send + Sync {
    fn fetch(&self, feed_url: &str) -> impl Future<Output = Result<Vec<FeedItem>>> + Send;
}

pub struct FeedFetcher {
    client: Client,
}

impl FeedFetcher {
    pub fn new(timeout: Duration, max_redirects: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .redirect(redirect::Policy::limited(max_redirects))
            .user_agent("opinion-forum/0.1")
            .build()?;

        Ok(Self { client })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.feed_timeout(), config.max_redirects)
    }
}

impl FeedClient for FeedFetcher {
    async fn fetch(&self, feed_url: &str) -> Result<Vec<FeedItem>> {
        let response = self.client.get(feed_url).send().await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!("Failed to fetch feed: HTTP {}", response.status()).into());
        }

        let bytes = response.bytes().await?;
        parse_feed(&bytes[..])
    }
}

/// Parse RSS/Atom bytes into items.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<FeedItem>> {
    let feed = parser::parse(bytes)?;
    Ok(feed.entries.into_iter().map(item_from_entry).collect())
}

fn item_from_entry(entry: Entry) -> FeedItem {
    let content = entry
        .content
        .as_ref()
        .and_then(|c| c.body.as_deref())
        .and_then(html_to_text);
    let snippet = entry
        .summary
        .as_ref()
        .and_then(|s| html_to_text(&s.content));

    FeedItem {
        title: entry
            .title
            .map(|t| t.content.trim().to_string())
            .filter(|t| !t.is_empty()),
        author: entry
            .authors
            .first()
            .map(|a| a.name.trim().to_string())
            .filter(|a| !a.is_empty()),
        link: entry.links.first().map(|l| l.href.clone()),
        content,
        snippet,
        published_at: entry.published.or(entry.updated),
    }
}

fn html_to_text(html: &str) -> Option<String> {
    let text = match html2text::from_read(html.as_bytes(), 10_000) {
        Ok(t) => t,
        Err(e) => {
            tracing::debug!("Failed to convert HTML to text: {}", e);
            return None;
        }
    };

    let cleaned = text
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel>
    <title>Example Opinion</title>
    <link>https://example.com/</link>
    <description>Opinions</description>
    <item>
      <title>AI Regulation Must Come Now</title>
      <link>https://example.com/ai-regulation</link>
      <dc:creator>Dr. Sarah Chen</dc:creator>
      <description>&lt;p&gt;The rapid advancement of &lt;b&gt;artificial intelligence&lt;/b&gt; poses risks.&lt;/p&gt;</description>
      <pubDate>Mon, 06 Jan 2025 10:00:00 GMT</pubDate>
    </item>
    <item>
      <description>No title or link here.</description>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_rss_items() {
        let items = parse_feed(RSS.as_bytes()).unwrap();
        assert_eq!(items.len(), 2);

        let first = &items[0];
        assert_eq!(first.title.as_deref(), Some("AI Regulation Must Come Now"));
        assert_eq!(first.link.as_deref(), Some("https://example.com/ai-regulation"));
        assert_eq!(first.author.as_deref(), Some("Dr. Sarah Chen"));
        assert!(first.published_at.is_some());

        let snippet = first.snippet.as_deref().unwrap();
        assert!(snippet.contains("artificial intelligence"));
        assert!(!snippet.contains("<b>"));

        let second = &items[1];
        assert!(second.title.is_none());
        assert!(second.link.is_none());
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(parse_feed(b"definitely not a feed").is_err());
    }
}
