pub const SCHEMA: &str = r#"
PRAGMA foreign_keys = ON;

-- sources table
CREATE TABLE IF NOT EXISTS sources (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    url TEXT NOT NULL,
    feed_url TEXT,
    bias TEXT NOT NULL,
    category TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- opinions table (append-only, deduplicated by canonical url)
CREATE TABLE IF NOT EXISTS opinions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source_id TEXT NOT NULL REFERENCES sources(id),
    title TEXT NOT NULL,
    author TEXT,
    url TEXT NOT NULL UNIQUE,
    content TEXT NOT NULL,
    excerpt TEXT,
    published_at TEXT,
    ingested_at TEXT NOT NULL,
    category TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_opinions_source ON opinions(source_id);
CREATE INDEX IF NOT EXISTS idx_opinions_category ON opinions(category);
CREATE INDEX IF NOT EXISTS idx_opinions_ingested_at ON opinions(ingested_at DESC);

-- topics table
CREATE TABLE IF NOT EXISTS topics (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    summary TEXT,
    category TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    is_featured INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_topics_featured ON topics(is_featured);
CREATE INDEX IF NOT EXISTS idx_topics_category ON topics(category);

-- topic_opinions link table
CREATE TABLE IF NOT EXISTS topic_opinions (
    topic_id INTEGER NOT NULL REFERENCES topics(id) ON DELETE CASCADE,
    opinion_id INTEGER NOT NULL REFERENCES opinions(id) ON DELETE CASCADE,
    relevance_score REAL NOT NULL DEFAULT 1.0,
    PRIMARY KEY (topic_id, opinion_id)
);

-- agents table
CREATE TABLE IF NOT EXISTS agents (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    avatar TEXT NOT NULL,
    persona TEXT NOT NULL,
    bias TEXT NOT NULL,
    style TEXT NOT NULL,
    color_class TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- agent_analyses table (append-only; re-runs add rows)
CREATE TABLE IF NOT EXISTS agent_analyses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    topic_id INTEGER NOT NULL REFERENCES topics(id) ON DELETE CASCADE,
    agent_id TEXT NOT NULL REFERENCES agents(id),
    analysis TEXT NOT NULL,
    stance TEXT NOT NULL,
    key_points TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_agent_analyses_topic ON agent_analyses(topic_id);

-- summaries table (one per topic)
CREATE TABLE IF NOT EXISTS summaries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    topic_id INTEGER NOT NULL UNIQUE REFERENCES topics(id) ON DELETE CASCADE,
    pro_points TEXT NOT NULL,
    con_points TEXT NOT NULL,
    neutral_context TEXT NOT NULL,
    created_at TEXT NOT NULL
);
"#;
