//! Pipeline coordinator: seeding, crawl + cluster, and per-topic analysis.

use std::collections::HashMap;

use futures::future::join_all;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::agents::default_agents;
use crate::ai::{
    compose_analysis_prompt, compose_summary_prompt, AnalysisExecutor, TextGenerator,
    TRAILER_REQUEST,
};
use crate::cluster::TopicClusterer;
use crate::config::Config;
use crate::db::Repository;
use crate::error::{AppError, Result};
use crate::feed::{default_sources, FeedClient};
use crate::ingest::Ingestor;
use crate::models::{
    Agent, Analysis, AnalysisStatus, AnalysisWithAgent, Category, Opinion, Source, Summary,
    Topic, TopicDetail, TopicWithCounts,
};

/// Whether the source and persona registries have been seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SystemState {
    #[default]
    NotReady,
    Ready,
}

/// Result of one analysis run over a topic.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub topic: Topic,
    pub analyses: Vec<Analysis>,
    pub summary: Summary,
    pub status: AnalysisStatus,
    /// One entry per persona or summary call that fell back to placeholder output.
    pub degraded: Vec<String>,
}

/// The prompts an analysis run would send, without sending them.
#[derive(Debug, Clone)]
pub struct PreparedAnalysis {
    pub topic: Topic,
    pub opinions: Vec<Opinion>,
    /// (agent id, full prompt including the trailer request)
    pub agent_prompts: Vec<(String, String)>,
    pub summary_prompt: String,
}

pub struct Pipeline<F, G> {
    repository: Repository,
    ingestor: Ingestor<F>,
    clusterer: TopicClusterer,
    executor: AnalysisExecutor<G>,
    sources: Vec<Source>,
    recent_limit: usize,
    state: Mutex<SystemState>,
    statuses: Mutex<HashMap<i64, AnalysisStatus>>,
}

impl<F: FeedClient, G: TextGenerator> Pipeline<F, G> {
    pub fn new(config: &Config, repository: Repository, feeds: F, generator: G) -> Self {
        Self {
            ingestor: Ingestor::new(feeds, repository.clone(), config),
            clusterer: TopicClusterer::new(repository.clone()),
            executor: AnalysisExecutor::new(generator, config),
            sources: config.sources.clone().unwrap_or_else(default_sources),
            recent_limit: config.recent_opinion_limit,
            state: Mutex::new(SystemState::NotReady),
            statuses: Mutex::new(HashMap::new()),
            repository,
        }
    }

    pub async fn state(&self) -> SystemState {
        *self.state.lock().await
    }

    /// Seed sources and personas. Safe to call from every entry point.
    pub async fn initialize_system(&self) -> Result<()> {
        self.ensure_ready().await
    }

    /// Seed once per process. A failed attempt leaves the state `NotReady`
    /// so the next call retries the whole seeding.
    pub async fn ensure_ready(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        if *state == SystemState::Ready {
            return Ok(());
        }

        match self.seed().await {
            Ok(()) => {
                *state = SystemState::Ready;
                info!("System initialized - sources={}", self.sources.len());
                Ok(())
            }
            Err(e) => {
                error!("Initialization failed: {}", e);
                Err(AppError::InitializationFailed(e.to_string()))
            }
        }
    }

    async fn seed(&self) -> Result<()> {
        self.repository.upsert_sources(self.sources.clone()).await?;
        self.repository.upsert_agents(default_agents()).await?;
        Ok(())
    }

    /// Crawl every source, then cluster the newest opinions from this crawl.
    pub async fn run_ingest_and_cluster(&self) -> Result<Vec<Topic>> {
        self.ensure_ready().await?;

        let report = self.ingestor.ingest_all(&self.sources).await;
        let mut fresh = report.opinions;
        fresh.sort_by(|a, b| {
            let a = a.published_at.unwrap_or(a.ingested_at);
            let b = b.published_at.unwrap_or(b.ingested_at);
            b.cmp(&a)
        });
        fresh.truncate(self.recent_limit);

        debug!("Clustering {} fresh opinions", fresh.len());
        self.clusterer.cluster_topics(&fresh).await
    }

    /// Run every persona and the summary over a topic, persisting the results.
    /// Re-running appends analyses and replaces the summary.
    pub async fn run_analysis_pipeline(&self, topic_id: i64) -> Result<PipelineRun> {
        if self.state().await != SystemState::Ready {
            return Err(AppError::NotInitialized);
        }

        let topic = self
            .repository
            .get_topic(topic_id)
            .await?
            .ok_or(AppError::TopicNotFound(topic_id))?;

        self.set_status(topic_id, AnalysisStatus::Running).await;
        match self.execute(topic).await {
            Ok(run) => {
                self.set_status(topic_id, run.status).await;
                Ok(run)
            }
            Err(e) => {
                self.set_status(topic_id, AnalysisStatus::Pending).await;
                Err(e)
            }
        }
    }

    async fn execute(&self, topic: Topic) -> Result<PipelineRun> {
        let opinions = self.repository.get_topic_opinions(topic.id).await?;
        let agents = self.repository.get_all_agents().await?;

        info!(
            "Analysis starting - topic={}, opinions={}, agents={}",
            topic.id,
            opinions.len(),
            agents.len()
        );
        let started = std::time::Instant::now();

        let agent_tasks = agents.iter().map(|agent| {
            let topic = &topic;
            let opinions = &opinions;
            async move {
                let decoded = self.executor.run_agent_analysis(agent, topic, opinions).await;
                (agent, decoded)
            }
        });
        let (agent_results, summary) = tokio::join!(
            join_all(agent_tasks),
            self.executor.run_summary(&topic, &opinions)
        );

        let mut degraded = Vec::new();
        let mut analyses = Vec::with_capacity(agent_results.len());
        for (agent, decoded) in agent_results {
            if let Some(reason) = decoded.reason() {
                degraded.push(format!("{}: {}", agent.id, reason));
            }
            let response = decoded.into_value();
            let analysis = self
                .repository
                .insert_analysis(
                    topic.id,
                    &agent.id,
                    response.analysis,
                    response.stance,
                    response.key_points,
                )
                .await?;
            analyses.push(analysis);
        }

        if let Some(reason) = summary.reason() {
            degraded.push(format!("summary: {}", reason));
        }
        let content = summary.into_value();
        let summary = self
            .repository
            .upsert_summary(
                topic.id,
                content.pro_points,
                content.con_points,
                content.neutral_context,
            )
            .await?;

        let status = if degraded.is_empty() {
            AnalysisStatus::Completed
        } else {
            AnalysisStatus::Degraded
        };

        info!(
            "Analysis finished - topic={}, analyses={}, degraded={}, elapsed={:.1}s",
            topic.id,
            analyses.len(),
            degraded.len(),
            started.elapsed().as_secs_f32()
        );

        Ok(PipelineRun {
            topic,
            analyses,
            summary,
            status,
            degraded,
        })
    }

    /// Compose every prompt an analysis run would send, without calling the backend.
    pub async fn prepare_analysis(&self, topic_id: i64) -> Result<PreparedAnalysis> {
        self.ensure_ready().await?;

        let topic = self
            .repository
            .get_topic(topic_id)
            .await?
            .ok_or(AppError::TopicNotFound(topic_id))?;
        let opinions = self.repository.get_topic_opinions(topic_id).await?;
        let agents = self.repository.get_all_agents().await?;

        let agent_prompts = agents
            .iter()
            .map(|agent| {
                let prompt = format!(
                    "{}{}",
                    compose_analysis_prompt(agent, &topic, &opinions),
                    TRAILER_REQUEST
                );
                (agent.id.clone(), prompt)
            })
            .collect();
        let summary_prompt = compose_summary_prompt(&topic, &opinions);

        Ok(PreparedAnalysis {
            topic,
            opinions,
            agent_prompts,
            summary_prompt,
        })
    }

    pub async fn analysis_status(&self, topic_id: i64) -> AnalysisStatus {
        self.statuses
            .lock()
            .await
            .get(&topic_id)
            .copied()
            .unwrap_or_default()
    }

    async fn set_status(&self, topic_id: i64, status: AnalysisStatus) {
        self.statuses.lock().await.insert(topic_id, status);
    }

    // Read accessors

    pub async fn topics(&self, category: Option<Category>) -> Result<Vec<Topic>> {
        self.repository.get_topics(category).await
    }

    pub async fn topics_with_counts(&self, category: Option<Category>) -> Result<Vec<TopicWithCounts>> {
        self.repository.get_topics_with_counts(category).await
    }

    pub async fn featured_topics(&self) -> Result<Vec<Topic>> {
        self.repository.get_featured_topics().await
    }

    pub async fn topic_detail(&self, topic_id: i64) -> Result<TopicDetail> {
        self.repository
            .get_topic_detail(topic_id)
            .await?
            .ok_or(AppError::TopicNotFound(topic_id))
    }

    pub async fn topic_analyses(&self, topic_id: i64) -> Result<Vec<AnalysisWithAgent>> {
        self.repository.get_topic_analyses(topic_id).await
    }

    pub async fn topic_summary(&self, topic_id: i64) -> Result<Option<Summary>> {
        self.repository.get_summary(topic_id).await
    }

    pub async fn agents(&self) -> Result<Vec<Agent>> {
        self.repository.get_all_agents().await
    }

    pub async fn sources(&self) -> Result<Vec<Source>> {
        self.repository.get_all_sources().await
    }
}
