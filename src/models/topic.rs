use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, OpinionWithSource};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: i64,
    pub title: String,
    pub summary: Option<String>,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_featured: bool,
}

#[derive(Debug, Clone)]
pub struct NewTopic {
    pub title: String,
    pub summary: Option<String>,
    pub category: Category,
    pub is_featured: bool,
}

/// Partial metadata edit; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct TopicUpdate {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub category: Option<Category>,
    pub is_featured: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopicOpinion {
    pub topic_id: i64,
    pub opinion_id: i64,
    pub relevance_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicWithCounts {
    #[serde(flatten)]
    pub topic: Topic,
    pub opinions_count: usize,
    pub analyses_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopicDetail {
    pub topic: Topic,
    pub opinions: Vec<OpinionWithSource>,
}
