use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// An opinion outlet. Keyed by a stable slug; upserted, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    pub name: String,
    pub url: String,
    pub feed_url: Option<String>,
    pub bias: String,
    pub category: String,
}

impl Source {
    /// Check the slug shape of `id` and that every URL parses.
    pub fn validate(&self) -> Result<()> {
        let slug_ok = !self.id.is_empty()
            && self
                .id
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !slug_ok {
            return Err(AppError::Config(format!("invalid source id '{}'", self.id)));
        }

        url::Url::parse(&self.url)
            .map_err(|e| AppError::Config(format!("source {}: bad url: {}", self.id, e)))?;
        if let Some(feed_url) = &self.feed_url {
            url::Url::parse(feed_url).map_err(|e| {
                AppError::Config(format!("source {}: bad feed_url: {}", self.id, e))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(id: &str, url: &str) -> Source {
        Source {
            id: id.to_string(),
            name: "Example".to_string(),
            url: url.to_string(),
            feed_url: Some("https://example.com/feed".to_string()),
            bias: "centrist".to_string(),
            category: "magazine".to_string(),
        }
    }

    #[test]
    fn accepts_slug_and_urls() {
        assert!(source("example-opinion", "https://example.com/").validate().is_ok());
    }

    #[test]
    fn rejects_non_slug_ids() {
        assert!(source("Example Opinion", "https://example.com/").validate().is_err());
        assert!(source("", "https://example.com/").validate().is_err());
    }

    #[test]
    fn rejects_unparseable_urls() {
        assert!(source("example", "not a url").validate().is_err());
    }
}
