use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AgentBadge;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub id: i64,
    pub topic_id: i64,
    pub agent_id: String,
    pub analysis: String,
    pub stance: String,
    pub key_points: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisWithAgent {
    #[serde(flatten)]
    pub analysis: Analysis,
    pub agent: AgentBadge,
}

/// Per-topic analysis run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    #[default]
    Pending,
    Running,
    Completed,
    /// At least one persona or the summary call produced placeholder output.
    Degraded,
}
