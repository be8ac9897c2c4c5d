use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] tokio_rusqlite::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    FeedParse(#[from] feed_rs::parser::ParseFeedError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Claude API error: {0}")]
    ClaudeApi(String),

    #[error("No Anthropic API key configured")]
    NoApiKey,

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Topic {0} not found")]
    TopicNotFound(i64),

    #[error("A topic needs at least one opinion")]
    EmptyTopic,

    #[error("System not initialized")]
    NotInitialized,

    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Unknown category: {0}")]
    InvalidCategory(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// True for the "not found" result a presentation layer renders as a 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::TopicNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
