use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;
use tokio_test::assert_ok;

use opinion_forum::agents::{find_agent, PERSONA_COUNT};
use opinion_forum::ai::TextGenerator;
use opinion_forum::config::Config;
use opinion_forum::db::{Repository, DEFAULT_RELEVANCE};
use opinion_forum::error::{AppError, Result};
use opinion_forum::feed::{FeedClient, FeedItem};
use opinion_forum::models::{AnalysisStatus, Category, Source};
use opinion_forum::pipeline::{Pipeline, SystemState};

const TECH_FEED: &str = "https://tech-desk.test/feed";
const DOWN_FEED: &str = "https://down-desk.test/feed";

struct FakeFeeds {
    feeds: HashMap<String, Vec<FeedItem>>,
}

impl FeedClient for FakeFeeds {
    async fn fetch(&self, feed_url: &str) -> Result<Vec<FeedItem>> {
        self.feeds
            .get(feed_url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("connection refused").into())
    }
}

/// Answers summary prompts with JSON and persona prompts with a trailer.
/// Prompts starting with `fail_persona` get a backend error.
#[derive(Default)]
struct FakeModel {
    calls: Arc<AtomicUsize>,
    fail_persona: Option<String>,
}

impl TextGenerator for FakeModel {
    async fn generate(&self, prompt: &str, _max_tokens: u32) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(persona) = &self.fail_persona {
            if prompt.starts_with(persona.as_str()) {
                return Err(AppError::ClaudeApi("overloaded".to_string()));
            }
        }

        if prompt.contains("\"pro_points\"") {
            return Ok(r#"Here is the summary:
{"pro_points": ["Guards against harm", "Builds trust"],
 "con_points": ["Slows research"],
 "neutral_context": "Lawmakers are weighing several proposals."}"#
                .to_string());
        }

        Ok("Regulation deserves a careful look.\n\nSTANCE: Cautious support\nKEY_POINTS: [\"Risk is real\", \"Rules lag\", \"Markets adapt\"]"
            .to_string())
    }
}

fn tech_items() -> Vec<FeedItem> {
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    [
        "AI Regulation Must Come Now",
        "Let Innovation Flourish: Against AI Regulation",
        "A Balanced Approach to AI Governance",
    ]
    .iter()
    .enumerate()
    .map(|(i, title)| FeedItem {
        title: Some(title.to_string()),
        author: Some(format!("Writer {}", i)),
        link: Some(format!("https://tech-desk.test/pieces/{}", i)),
        content: Some("Artificial intelligence software is reshaping technology.".to_string()),
        snippet: None,
        published_at: Some(base + Duration::hours(i as i64)),
    })
    .collect()
}

fn source(id: &str, feed_url: &str) -> Source {
    Source {
        id: id.to_string(),
        name: id.to_string(),
        url: format!("https://{}.test/", id),
        feed_url: Some(feed_url.to_string()),
        bias: "centrist".to_string(),
        category: "magazine".to_string(),
    }
}

struct Harness {
    _dir: TempDir,
    db_path: String,
    repository: Repository,
    pipeline: Pipeline<FakeFeeds, FakeModel>,
}

async fn harness(model: FakeModel) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("forum.db").to_string_lossy().to_string();
    let config = Config {
        db_path: db_path.clone(),
        sources: Some(vec![
            source("tech-desk", TECH_FEED),
            source("down-desk", DOWN_FEED),
        ]),
        ..Config::default()
    };

    let feeds = FakeFeeds {
        feeds: HashMap::from([(TECH_FEED.to_string(), tech_items())]),
    };
    let repository = Repository::new(&db_path).await.unwrap();
    let pipeline = Pipeline::new(&config, repository.clone(), feeds, model);

    Harness {
        _dir: dir,
        db_path,
        repository,
        pipeline,
    }
}

#[tokio::test]
async fn crawl_forms_one_featured_tech_topic() {
    let h = harness(FakeModel::default()).await;

    let topics = h.pipeline.run_ingest_and_cluster().await.unwrap();
    assert_eq!(topics.len(), 1);

    let topic = &topics[0];
    assert_eq!(topic.category, Category::Tech);
    assert!(topic.title.contains("Regulation"), "title was {}", topic.title);
    assert!(topic.is_featured);

    let links = h.repository.get_topic_links(topic.id).await.unwrap();
    assert_eq!(links.len(), 3);
    assert!(links.iter().all(|l| l.relevance_score == DEFAULT_RELEVANCE));
}

#[tokio::test]
async fn recrawl_adds_no_opinions_or_topics() {
    let h = harness(FakeModel::default()).await;

    h.pipeline.run_ingest_and_cluster().await.unwrap();
    let again = h.pipeline.run_ingest_and_cluster().await.unwrap();

    assert!(again.is_empty());
    assert_eq!(h.repository.get_recent_opinions(100).await.unwrap().len(), 3);
    assert_eq!(h.pipeline.topics(None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn analysis_appends_rows_and_upserts_summary() {
    let h = harness(FakeModel::default()).await;
    let topic = h.pipeline.run_ingest_and_cluster().await.unwrap().remove(0);

    assert_eq!(h.pipeline.analysis_status(topic.id).await, AnalysisStatus::Pending);
    let run = h.pipeline.run_analysis_pipeline(topic.id).await.unwrap();

    assert_eq!(run.status, AnalysisStatus::Completed);
    assert!(run.degraded.is_empty());
    assert_eq!(run.analyses.len(), PERSONA_COUNT);
    let mut agent_ids: Vec<_> = run.analyses.iter().map(|a| a.agent_id.clone()).collect();
    agent_ids.sort();
    agent_ids.dedup();
    assert_eq!(agent_ids.len(), PERSONA_COUNT);
    assert!(run.analyses.iter().all(|a| a.stance == "Cautious support"));
    assert_eq!(run.summary.pro_points.len(), 2);
    assert_eq!(h.pipeline.analysis_status(topic.id).await, AnalysisStatus::Completed);
    assert_eq!(h.repository.count_summaries(topic.id).await.unwrap(), 1);

    let rerun = h.pipeline.run_analysis_pipeline(topic.id).await.unwrap();
    assert_eq!(rerun.summary.id, run.summary.id);
    assert_eq!(h.pipeline.topic_analyses(topic.id).await.unwrap().len(), 2 * PERSONA_COUNT);
    assert_eq!(h.repository.count_summaries(topic.id).await.unwrap(), 1);

    let counts = h.pipeline.topics_with_counts(Some(Category::Tech)).await.unwrap();
    assert_eq!(counts[0].opinions_count, 3);
    assert_eq!(counts[0].analyses_count, 2 * PERSONA_COUNT);
}

#[tokio::test]
async fn failing_persona_degrades_but_persists_every_row() {
    let skeptic = find_agent("agent-skeptic").unwrap();
    let h = harness(FakeModel {
        fail_persona: Some(skeptic.persona),
        ..FakeModel::default()
    })
    .await;
    let topic = h.pipeline.run_ingest_and_cluster().await.unwrap().remove(0);

    let run = h.pipeline.run_analysis_pipeline(topic.id).await.unwrap();

    assert_eq!(run.status, AnalysisStatus::Degraded);
    assert_eq!(run.degraded.len(), 1);
    assert!(run.degraded[0].starts_with("agent-skeptic"));
    assert_eq!(run.analyses.len(), PERSONA_COUNT);
    assert_eq!(h.pipeline.analysis_status(topic.id).await, AnalysisStatus::Degraded);
}

#[tokio::test]
async fn unknown_topic_is_not_found() {
    let h = harness(FakeModel::default()).await;
    assert_ok!(h.pipeline.initialize_system().await);

    let err = h.pipeline.run_analysis_pipeline(999).await.unwrap_err();
    assert!(matches!(err, AppError::TopicNotFound(999)));
    assert!(err.is_not_found());
    assert!(h.pipeline.topic_detail(999).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn analysis_before_initialization_is_rejected() {
    let h = harness(FakeModel::default()).await;

    let err = h.pipeline.run_analysis_pipeline(1).await.unwrap_err();
    assert!(matches!(err, AppError::NotInitialized));
    assert_eq!(h.pipeline.state().await, SystemState::NotReady);
}

#[tokio::test]
async fn initialization_is_idempotent() {
    let h = harness(FakeModel::default()).await;

    assert_ok!(h.pipeline.initialize_system().await);
    assert_ok!(h.pipeline.initialize_system().await);

    assert_eq!(h.pipeline.state().await, SystemState::Ready);
    assert_eq!(h.pipeline.agents().await.unwrap().len(), PERSONA_COUNT);
    assert_eq!(h.pipeline.sources().await.unwrap().len(), 2);
}

#[tokio::test]
async fn failed_initialization_is_retried() {
    let h = harness(FakeModel::default()).await;

    let raw = rusqlite::Connection::open(&h.db_path).unwrap();
    raw.execute_batch("DROP TABLE agent_analyses; DROP TABLE agents;")
        .unwrap();
    drop(raw);

    let err = h.pipeline.initialize_system().await.unwrap_err();
    assert!(matches!(err, AppError::InitializationFailed(_)));
    assert_eq!(h.pipeline.state().await, SystemState::NotReady);

    // reopening reapplies the schema
    Repository::new(&h.db_path).await.unwrap();

    assert_ok!(h.pipeline.initialize_system().await);
    assert_eq!(h.pipeline.state().await, SystemState::Ready);
    assert_eq!(h.pipeline.agents().await.unwrap().len(), PERSONA_COUNT);
}

#[tokio::test]
async fn prepare_composes_prompts_without_calling_backend() {
    let calls = Arc::new(AtomicUsize::new(0));
    let h = harness(FakeModel {
        calls: calls.clone(),
        ..FakeModel::default()
    })
    .await;
    let topic = h.pipeline.run_ingest_and_cluster().await.unwrap().remove(0);

    let prepared = h.pipeline.prepare_analysis(topic.id).await.unwrap();

    assert_eq!(prepared.opinions.len(), 3);
    assert_eq!(prepared.agent_prompts.len(), PERSONA_COUNT);
    assert!(prepared
        .agent_prompts
        .iter()
        .all(|(_, prompt)| prompt.contains("KEY_POINTS:")));
    assert!(prepared.summary_prompt.contains(&topic.title));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.pipeline.analysis_status(topic.id).await, AnalysisStatus::Pending);
}

#[tokio::test]
async fn topic_detail_names_sources() {
    let h = harness(FakeModel::default()).await;
    let topic = h.pipeline.run_ingest_and_cluster().await.unwrap().remove(0);

    let detail = h.pipeline.topic_detail(topic.id).await.unwrap();
    assert_eq!(detail.opinions.len(), 3);
    assert!(detail.opinions.iter().all(|o| o.source_name == "tech-desk"));
    assert_eq!(h.pipeline.featured_topics().await.unwrap().len(), 1);
    assert!(h.pipeline.topic_summary(topic.id).await.unwrap().is_none());
}
