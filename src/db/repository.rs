use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tokio_rusqlite::Connection;

use crate::error::{AppError, Result};
use crate::models::{
    Agent, AgentBadge, Analysis, AnalysisWithAgent, Category, NewOpinion, NewTopic, Opinion,
    OpinionWithSource, Source, Summary, Topic, TopicDetail, TopicOpinion, TopicUpdate,
    TopicWithCounts,
};

use super::schema::SCHEMA;

/// Relevance assigned to every topic/opinion link. No ranking is computed.
pub const DEFAULT_RELEVANCE: f64 = 1.0;

const OPINION_COLUMNS: &str = "o.id, o.source_id, o.title, o.author, o.url, o.content, o.excerpt, \
                               o.published_at, o.ingested_at, o.category";
const TOPIC_COLUMNS: &str = "t.id, t.title, t.summary, t.category, t.created_at, t.updated_at, t.is_featured";

#[derive(Clone)]
pub struct Repository {
    conn: Connection,
}

impl Repository {
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).await?;

        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    // Source operations

    /// Upsert every source in one transaction; either all land or none do.
    pub async fn upsert_sources(&self, sources: Vec<Source>) -> Result<usize> {
        let count = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                {
                    let mut stmt = tx.prepare(
                        r#"INSERT INTO sources (id, name, url, feed_url, bias, category)
                           VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                           ON CONFLICT(id) DO UPDATE SET
                               name = excluded.name,
                               url = excluded.url,
                               feed_url = excluded.feed_url,
                               bias = excluded.bias,
                               category = excluded.category"#,
                    )?;
                    for source in &sources {
                        stmt.execute(params![
                            source.id,
                            source.name,
                            source.url,
                            source.feed_url,
                            source.bias,
                            source.category,
                        ])?;
                    }
                }
                tx.commit()?;
                Ok(sources.len())
            })
            .await?;
        Ok(count)
    }

    pub async fn get_all_sources(&self) -> Result<Vec<Source>> {
        let sources = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, name, url, feed_url, bias, category FROM sources ORDER BY id",
                )?;
                let sources = stmt
                    .query_map([], source_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(sources)
            })
            .await?;
        Ok(sources)
    }

    // Agent operations

    pub async fn upsert_agents(&self, agents: Vec<Agent>) -> Result<usize> {
        let count = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                {
                    let mut stmt = tx.prepare(
                        r#"INSERT INTO agents (id, name, avatar, persona, bias, style, color_class)
                           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                           ON CONFLICT(id) DO UPDATE SET
                               name = excluded.name,
                               avatar = excluded.avatar,
                               persona = excluded.persona,
                               bias = excluded.bias,
                               style = excluded.style,
                               color_class = excluded.color_class"#,
                    )?;
                    for agent in &agents {
                        stmt.execute(params![
                            agent.id,
                            agent.name,
                            agent.avatar,
                            agent.persona,
                            agent.bias,
                            agent.style,
                            agent.color_class,
                        ])?;
                    }
                }
                tx.commit()?;
                Ok(agents.len())
            })
            .await?;
        Ok(count)
    }

    pub async fn get_all_agents(&self) -> Result<Vec<Agent>> {
        let agents = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, name, avatar, persona, bias, style, color_class FROM agents ORDER BY rowid",
                )?;
                let agents = stmt
                    .query_map([], agent_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(agents)
            })
            .await?;
        Ok(agents)
    }

    // Opinion operations

    /// Insert a new opinion. Returns `None` when the canonical URL is already
    /// stored, so re-crawling the same feed is a no-op.
    pub async fn insert_opinion(&self, opinion: NewOpinion) -> Result<Option<Opinion>> {
        let ingested_at = Utc::now();
        let inserted = self
            .conn
            .call(move |conn| {
                let changed = conn.execute(
                    r#"INSERT INTO opinions (source_id, title, author, url, content, excerpt,
                                             published_at, ingested_at, category)
                       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                       ON CONFLICT(url) DO NOTHING"#,
                    params![
                        opinion.source_id,
                        opinion.title,
                        opinion.author,
                        opinion.url,
                        opinion.content,
                        opinion.excerpt,
                        opinion.published_at.map(|dt| dt.to_rfc3339()),
                        ingested_at.to_rfc3339(),
                        opinion.category.as_str(),
                    ],
                )?;
                if changed == 0 {
                    return Ok(None);
                }
                let id = conn.last_insert_rowid();
                Ok(Some(Opinion {
                    id,
                    source_id: opinion.source_id,
                    title: opinion.title,
                    author: opinion.author,
                    url: opinion.url,
                    content: opinion.content,
                    excerpt: opinion.excerpt,
                    published_at: opinion.published_at,
                    ingested_at,
                    category: opinion.category,
                }))
            })
            .await?;
        Ok(inserted)
    }

    pub async fn opinion_exists(&self, url: &str) -> Result<bool> {
        let url = url.to_string();
        let exists = self
            .conn
            .call(move |conn| {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM opinions WHERE url = ?1",
                    params![url],
                    |row| row.get(0),
                )?;
                Ok(count > 0)
            })
            .await?;
        Ok(exists)
    }

    pub async fn get_recent_opinions(&self, limit: usize) -> Result<Vec<Opinion>> {
        let opinions = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {OPINION_COLUMNS} FROM opinions o ORDER BY o.ingested_at DESC, o.id DESC LIMIT ?1"
                ))?;
                let opinions = stmt
                    .query_map(params![limit as i64], opinion_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(opinions)
            })
            .await?;
        Ok(opinions)
    }

    pub async fn get_opinions_by_category(
        &self,
        category: Category,
        limit: usize,
    ) -> Result<Vec<Opinion>> {
        let opinions = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {OPINION_COLUMNS} FROM opinions o WHERE o.category = ?1 \
                     ORDER BY o.ingested_at DESC, o.id DESC LIMIT ?2"
                ))?;
                let opinions = stmt
                    .query_map(params![category.as_str(), limit as i64], opinion_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(opinions)
            })
            .await?;
        Ok(opinions)
    }

    // Topic operations

    /// Insert a topic and link every opinion to it in one transaction.
    /// A topic with no opinions is rejected.
    pub async fn create_topic(&self, topic: NewTopic, opinion_ids: Vec<i64>) -> Result<Topic> {
        if opinion_ids.is_empty() {
            return Err(AppError::EmptyTopic);
        }
        let now = Utc::now();
        let created = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                tx.execute(
                    r#"INSERT INTO topics (title, summary, category, created_at, updated_at, is_featured)
                       VALUES (?1, ?2, ?3, ?4, ?4, ?5)"#,
                    params![
                        topic.title,
                        topic.summary,
                        topic.category.as_str(),
                        now.to_rfc3339(),
                        topic.is_featured,
                    ],
                )?;
                let id = tx.last_insert_rowid();
                {
                    let mut link = tx.prepare(
                        "INSERT OR REPLACE INTO topic_opinions (topic_id, opinion_id, relevance_score) VALUES (?1, ?2, ?3)",
                    )?;
                    for opinion_id in &opinion_ids {
                        link.execute(params![id, opinion_id, DEFAULT_RELEVANCE])?;
                    }
                }
                tx.commit()?;
                Ok(Topic {
                    id,
                    title: topic.title,
                    summary: topic.summary,
                    category: topic.category,
                    created_at: now,
                    updated_at: now,
                    is_featured: topic.is_featured,
                })
            })
            .await?;
        Ok(created)
    }

    pub async fn get_topic(&self, id: i64) -> Result<Option<Topic>> {
        let topic = self
            .conn
            .call(move |conn| {
                let topic = conn
                    .query_row(
                        &format!("SELECT {TOPIC_COLUMNS} FROM topics t WHERE t.id = ?1"),
                        params![id],
                        topic_from_row,
                    )
                    .optional()?;
                Ok(topic)
            })
            .await?;
        Ok(topic)
    }

    /// Opinions linked to a topic, highest relevance first.
    pub async fn get_topic_opinions(&self, topic_id: i64) -> Result<Vec<Opinion>> {
        let opinions = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {OPINION_COLUMNS} FROM opinions o \
                     JOIN topic_opinions l ON o.id = l.opinion_id \
                     WHERE l.topic_id = ?1 \
                     ORDER BY l.relevance_score DESC, o.id"
                ))?;
                let opinions = stmt
                    .query_map(params![topic_id], opinion_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(opinions)
            })
            .await?;
        Ok(opinions)
    }

    /// Topic plus its opinions and their source names, in one round trip.
    pub async fn get_topic_detail(&self, topic_id: i64) -> Result<Option<TopicDetail>> {
        let detail = self
            .conn
            .call(move |conn| {
                let topic = conn
                    .query_row(
                        &format!("SELECT {TOPIC_COLUMNS} FROM topics t WHERE t.id = ?1"),
                        params![topic_id],
                        topic_from_row,
                    )
                    .optional()?;
                let Some(topic) = topic else {
                    return Ok(None);
                };

                let mut stmt = conn.prepare(&format!(
                    "SELECT {OPINION_COLUMNS}, s.name FROM opinions o \
                     JOIN topic_opinions l ON o.id = l.opinion_id \
                     JOIN sources s ON o.source_id = s.id \
                     WHERE l.topic_id = ?1 \
                     ORDER BY l.relevance_score DESC, o.id"
                ))?;
                let opinions = stmt
                    .query_map(params![topic_id], |row| {
                        Ok(OpinionWithSource {
                            opinion: opinion_from_row(row)?,
                            source_name: row.get(10)?,
                        })
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(Some(TopicDetail { topic, opinions }))
            })
            .await?;
        Ok(detail)
    }

    pub async fn get_topic_links(&self, topic_id: i64) -> Result<Vec<TopicOpinion>> {
        let links = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT topic_id, opinion_id, relevance_score FROM topic_opinions WHERE topic_id = ?1 ORDER BY opinion_id",
                )?;
                let links = stmt
                    .query_map(params![topic_id], |row| {
                        Ok(TopicOpinion {
                            topic_id: row.get(0)?,
                            opinion_id: row.get(1)?,
                            relevance_score: row.get(2)?,
                        })
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(links)
            })
            .await?;
        Ok(links)
    }

    /// All topics, newest update first, optionally restricted to one category.
    pub async fn get_topics(&self, category: Option<Category>) -> Result<Vec<Topic>> {
        let topics = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {TOPIC_COLUMNS} FROM topics t \
                     WHERE (?1 IS NULL OR t.category = ?1) \
                     ORDER BY t.updated_at DESC, t.id DESC"
                ))?;
                let topics = stmt
                    .query_map(params![category.map(|c| c.as_str())], topic_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(topics)
            })
            .await?;
        Ok(topics)
    }

    pub async fn get_featured_topics(&self) -> Result<Vec<Topic>> {
        let topics = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {TOPIC_COLUMNS} FROM topics t WHERE t.is_featured = 1 \
                     ORDER BY t.updated_at DESC, t.id DESC"
                ))?;
                let topics = stmt
                    .query_map([], topic_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(topics)
            })
            .await?;
        Ok(topics)
    }

    /// Topics with opinion and analysis counts. Counts come from two grouped
    /// queries rather than one query per topic.
    pub async fn get_topics_with_counts(
        &self,
        category: Option<Category>,
    ) -> Result<Vec<TopicWithCounts>> {
        let topics = self.get_topics(category).await?;
        if topics.is_empty() {
            return Ok(Vec::new());
        }

        let (opinion_counts, analysis_counts) = self
            .conn
            .call(move |conn| {
                let filter = category.map(|c| c.as_str());
                let opinion_counts = grouped_counts(
                    conn,
                    "SELECT l.topic_id, COUNT(*) FROM topic_opinions l \
                     JOIN topics t ON t.id = l.topic_id \
                     WHERE (?1 IS NULL OR t.category = ?1) GROUP BY l.topic_id",
                    filter,
                )?;
                let analysis_counts = grouped_counts(
                    conn,
                    "SELECT a.topic_id, COUNT(*) FROM agent_analyses a \
                     JOIN topics t ON t.id = a.topic_id \
                     WHERE (?1 IS NULL OR t.category = ?1) GROUP BY a.topic_id",
                    filter,
                )?;
                Ok((opinion_counts, analysis_counts))
            })
            .await?;

        Ok(topics
            .into_iter()
            .map(|topic| TopicWithCounts {
                opinions_count: opinion_counts.get(&topic.id).copied().unwrap_or(0),
                analyses_count: analysis_counts.get(&topic.id).copied().unwrap_or(0),
                topic,
            })
            .collect())
    }

    /// Apply a metadata edit and bump `updated_at`. `None` if the topic is gone.
    pub async fn update_topic(&self, id: i64, update: TopicUpdate) -> Result<Option<Topic>> {
        let Some(existing) = self.get_topic(id).await? else {
            return Ok(None);
        };

        let updated = Topic {
            id,
            title: update.title.unwrap_or(existing.title),
            summary: update.summary.or(existing.summary),
            category: update.category.unwrap_or(existing.category),
            is_featured: update.is_featured.unwrap_or(existing.is_featured),
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        let row = updated.clone();
        self.conn
            .call(move |conn| {
                conn.execute(
                    r#"UPDATE topics
                       SET title = ?1, summary = ?2, category = ?3, is_featured = ?4, updated_at = ?5
                       WHERE id = ?6"#,
                    params![
                        row.title,
                        row.summary,
                        row.category.as_str(),
                        row.is_featured,
                        row.updated_at.to_rfc3339(),
                        row.id,
                    ],
                )?;
                Ok(())
            })
            .await?;
        Ok(Some(updated))
    }

    pub async fn delete_topic(&self, id: i64) -> Result<bool> {
        let deleted = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                // Delete related data first
                tx.execute("DELETE FROM topic_opinions WHERE topic_id = ?1", params![id])?;
                tx.execute("DELETE FROM agent_analyses WHERE topic_id = ?1", params![id])?;
                tx.execute("DELETE FROM summaries WHERE topic_id = ?1", params![id])?;
                let changed = tx.execute("DELETE FROM topics WHERE id = ?1", params![id])?;
                tx.commit()?;
                Ok(changed > 0)
            })
            .await?;
        Ok(deleted)
    }

    // Analysis operations

    /// Append an analysis row. Never replaces an earlier analysis.
    pub async fn insert_analysis(
        &self,
        topic_id: i64,
        agent_id: &str,
        analysis: String,
        stance: String,
        key_points: Vec<String>,
    ) -> Result<Analysis> {
        let key_points_json = serde_json::to_string(&key_points)?;
        let agent_id = agent_id.to_string();
        let created_at = Utc::now();
        let id = self
            .conn
            .call({
                let agent_id = agent_id.clone();
                let analysis = analysis.clone();
                let stance = stance.clone();
                move |conn| {
                    conn.execute(
                        r#"INSERT INTO agent_analyses (topic_id, agent_id, analysis, stance, key_points, created_at)
                           VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
                        params![
                            topic_id,
                            agent_id,
                            analysis,
                            stance,
                            key_points_json,
                            created_at.to_rfc3339(),
                        ],
                    )?;
                    Ok(conn.last_insert_rowid())
                }
            })
            .await?;

        Ok(Analysis {
            id,
            topic_id,
            agent_id,
            analysis,
            stance,
            key_points,
            created_at,
        })
    }

    /// Analyses for a topic joined with persona display metadata.
    pub async fn get_topic_analyses(&self, topic_id: i64) -> Result<Vec<AnalysisWithAgent>> {
        let analyses = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    r#"SELECT a.id, a.topic_id, a.agent_id, a.analysis, a.stance, a.key_points, a.created_at,
                              ag.name, ag.avatar, ag.bias, ag.color_class
                       FROM agent_analyses a
                       JOIN agents ag ON a.agent_id = ag.id
                       WHERE a.topic_id = ?1
                       ORDER BY a.created_at, a.id"#,
                )?;
                let analyses = stmt
                    .query_map(params![topic_id], |row| {
                        let analysis = analysis_from_row(row)?;
                        let agent = AgentBadge {
                            id: analysis.agent_id.clone(),
                            name: row.get(7)?,
                            avatar: row.get(8)?,
                            bias: row.get(9)?,
                            color_class: row.get(10)?,
                        };
                        Ok(AnalysisWithAgent { analysis, agent })
                    })?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(analyses)
            })
            .await?;
        Ok(analyses)
    }

    // Summary operations

    /// Insert or replace the summary for a topic.
    pub async fn upsert_summary(
        &self,
        topic_id: i64,
        pro_points: Vec<String>,
        con_points: Vec<String>,
        neutral_context: String,
    ) -> Result<Summary> {
        let pro_json = serde_json::to_string(&pro_points)?;
        let con_json = serde_json::to_string(&con_points)?;
        let created_at = Utc::now();
        let context = neutral_context.clone();
        let id = self
            .conn
            .call(move |conn| {
                let id: i64 = conn.query_row(
                    r#"INSERT INTO summaries (topic_id, pro_points, con_points, neutral_context, created_at)
                       VALUES (?1, ?2, ?3, ?4, ?5)
                       ON CONFLICT(topic_id) DO UPDATE SET
                           pro_points = excluded.pro_points,
                           con_points = excluded.con_points,
                           neutral_context = excluded.neutral_context,
                           created_at = excluded.created_at
                       RETURNING id"#,
                    params![topic_id, pro_json, con_json, context, created_at.to_rfc3339()],
                    |row| row.get(0),
                )?;
                Ok(id)
            })
            .await?;

        Ok(Summary {
            id,
            topic_id,
            pro_points,
            con_points,
            neutral_context,
            created_at,
        })
    }

    pub async fn get_summary(&self, topic_id: i64) -> Result<Option<Summary>> {
        let summary = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, topic_id, pro_points, con_points, neutral_context, created_at FROM summaries WHERE topic_id = ?1",
                )?;
                let summary = stmt.query_row(params![topic_id], summary_from_row).optional()?;
                Ok(summary)
            })
            .await?;
        Ok(summary)
    }

    pub async fn count_summaries(&self, topic_id: i64) -> Result<usize> {
        let count = self
            .conn
            .call(move |conn| {
                let count: i64 = conn.query_row(
                    "SELECT COUNT(*) FROM summaries WHERE topic_id = ?1",
                    params![topic_id],
                    |row| row.get(0),
                )?;
                Ok(count as usize)
            })
            .await?;
        Ok(count)
    }
}

fn grouped_counts(
    conn: &rusqlite::Connection,
    sql: &str,
    category: Option<&str>,
) -> rusqlite::Result<HashMap<i64, usize>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params![category], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)? as usize))
    })?;
    rows.collect()
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    // Try RFC3339 first (e.g., "2026-01-11T12:34:56+00:00")
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // Try SQLite datetime format (e.g., "2026-01-11 12:34:56")
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    None
}

/// Required timestamp column. Unreadable values fall back to the Unix epoch
/// so they sort oldest instead of newest.
fn timestamp(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw = row.get::<_, Option<String>>(idx)?;
    match raw.as_deref().and_then(parse_datetime) {
        Some(dt) => Ok(dt),
        None => {
            tracing::warn!("Unreadable timestamp in column {}: {:?}", idx, raw);
            Ok(DateTime::<Utc>::default())
        }
    }
}

fn string_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        tracing::warn!("Stored list column is not a JSON array: {}", e);
        Vec::new()
    })
}

fn source_from_row(row: &Row) -> rusqlite::Result<Source> {
    Ok(Source {
        id: row.get(0)?,
        name: row.get(1)?,
        url: row.get(2)?,
        feed_url: row.get(3)?,
        bias: row.get(4)?,
        category: row.get(5)?,
    })
}

fn agent_from_row(row: &Row) -> rusqlite::Result<Agent> {
    Ok(Agent {
        id: row.get(0)?,
        name: row.get(1)?,
        avatar: row.get(2)?,
        persona: row.get(3)?,
        bias: row.get(4)?,
        style: row.get(5)?,
        color_class: row.get(6)?,
    })
}

fn opinion_from_row(row: &Row) -> rusqlite::Result<Opinion> {
    Ok(Opinion {
        id: row.get(0)?,
        source_id: row.get(1)?,
        title: row.get(2)?,
        author: row.get(3)?,
        url: row.get(4)?,
        content: row.get(5)?,
        excerpt: row.get(6)?,
        published_at: row
            .get::<_, Option<String>>(7)?
            .and_then(|s| parse_datetime(&s)),
        ingested_at: timestamp(row, 8)?,
        category: Category::parse_lossy(&row.get::<_, String>(9)?),
    })
}

fn topic_from_row(row: &Row) -> rusqlite::Result<Topic> {
    Ok(Topic {
        id: row.get(0)?,
        title: row.get(1)?,
        summary: row.get(2)?,
        category: Category::parse_lossy(&row.get::<_, String>(3)?),
        created_at: timestamp(row, 4)?,
        updated_at: timestamp(row, 5)?,
        is_featured: row.get(6)?,
    })
}

fn analysis_from_row(row: &Row) -> rusqlite::Result<Analysis> {
    Ok(Analysis {
        id: row.get(0)?,
        topic_id: row.get(1)?,
        agent_id: row.get(2)?,
        analysis: row.get(3)?,
        stance: row.get(4)?,
        key_points: string_list(&row.get::<_, String>(5)?),
        created_at: timestamp(row, 6)?,
    })
}

fn summary_from_row(row: &Row) -> rusqlite::Result<Summary> {
    Ok(Summary {
        id: row.get(0)?,
        topic_id: row.get(1)?,
        pro_points: string_list(&row.get::<_, String>(2)?),
        con_points: string_list(&row.get::<_, String>(3)?),
        neutral_context: row.get(4)?,
        created_at: timestamp(row, 5)?,
    })
}
