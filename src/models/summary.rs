use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pro/con synthesis for a topic. One row per topic; regenerating replaces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub id: i64,
    pub topic_id: i64,
    pub pro_points: Vec<String>,
    pub con_points: Vec<String>,
    pub neutral_context: String,
    pub created_at: DateTime<Utc>,
}
