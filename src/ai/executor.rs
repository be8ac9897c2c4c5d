use std::time::Duration;

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{Agent, Opinion, Topic};

use super::client::TextGenerator;
use super::parse::{decode_agent_response, decode_summary, degraded_summary, AgentResponse, Decoded, SummaryContent};
use super::prompts::{compose_analysis_prompt, compose_summary_prompt, TRAILER_REQUEST};

pub const UNAVAILABLE_ANALYSIS: &str = "Analysis could not be generated for this perspective.";
pub const UNAVAILABLE_STANCE: &str = "Unavailable";

/// Runs composed prompts against a [`TextGenerator`] and decodes the replies.
/// Every call is bounded by a timeout and never returns an error.
pub struct AnalysisExecutor<G> {
    generator: G,
    max_tokens: u32,
    timeout: Duration,
}

impl<G: TextGenerator> AnalysisExecutor<G> {
    pub fn new(generator: G, config: &Config) -> Self {
        Self {
            generator,
            max_tokens: config.max_tokens,
            timeout: config.generation_timeout(),
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    async fn call(&self, prompt: &str) -> Result<String> {
        let text = tokio::time::timeout(self.timeout, self.generator.generate(prompt, self.max_tokens))
            .await
            .map_err(|_| AppError::Timeout("text generation".to_string()))??;

        if text.trim().is_empty() {
            return Err(AppError::ClaudeApi("empty response".to_string()));
        }
        Ok(text)
    }

    pub async fn run_agent_analysis(
        &self,
        agent: &Agent,
        topic: &Topic,
        opinions: &[Opinion],
    ) -> Decoded<AgentResponse> {
        let prompt = format!(
            "{}{}",
            compose_analysis_prompt(agent, topic, opinions),
            TRAILER_REQUEST
        );

        match self.call(&prompt).await {
            Ok(text) => {
                let decoded = decode_agent_response(&text);
                if let Some(reason) = decoded.reason() {
                    warn!("Degraded analysis from {} on topic {}: {}", agent.id, topic.id, reason);
                } else {
                    debug!("Analysis from {} on topic {} decoded", agent.id, topic.id);
                }
                decoded
            }
            Err(e) => {
                warn!("Analysis call for {} on topic {} failed: {}", agent.id, topic.id, e);
                Decoded::Degraded {
                    value: AgentResponse {
                        analysis: UNAVAILABLE_ANALYSIS.to_string(),
                        stance: UNAVAILABLE_STANCE.to_string(),
                        key_points: Vec::new(),
                    },
                    reason: e.to_string(),
                }
            }
        }
    }

    pub async fn run_summary(&self, topic: &Topic, opinions: &[Opinion]) -> Decoded<SummaryContent> {
        let prompt = compose_summary_prompt(topic, opinions);

        match self.call(&prompt).await {
            Ok(text) => decode_summary(&text),
            Err(e) => {
                warn!("Summary call for topic {} failed: {}", topic.id, e);
                Decoded::Degraded {
                    value: degraded_summary(),
                    reason: e.to_string(),
                }
            }
        }
    }
}
