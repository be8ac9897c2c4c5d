use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Category;

/// Maximum excerpt length, in characters.
pub const EXCERPT_CHARS: usize = 300;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opinion {
    pub id: i64,
    pub source_id: String,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub ingested_at: DateTime<Utc>,
    pub category: Category,
}

impl Opinion {
    /// Excerpt if present, otherwise the first `max_chars` of the content.
    pub fn excerpt_or_content(&self, max_chars: usize) -> String {
        match self.excerpt.as_deref() {
            Some(excerpt) if !excerpt.is_empty() => excerpt.to_string(),
            _ => truncate_chars(&self.content, max_chars),
        }
    }

    pub fn author_or_unknown(&self) -> &str {
        self.author.as_deref().unwrap_or("Unknown")
    }
}

/// Opinion joined with the name of its source.
#[derive(Debug, Clone, Serialize)]
pub struct OpinionWithSource {
    #[serde(flatten)]
    pub opinion: Opinion,
    pub source_name: String,
}

#[derive(Debug, Clone)]
pub struct NewOpinion {
    pub source_id: String,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub category: Category,
}

pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
