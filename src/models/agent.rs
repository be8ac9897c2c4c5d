use serde::{Deserialize, Serialize};

/// An analytical persona. The set of six is fixed at build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub persona: String,
    pub bias: String,
    pub style: String,
    pub color_class: String,
}

/// Display metadata carried alongside an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentBadge {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub bias: String,
    pub color_class: String,
}
