use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, Result};

const CLAUDE_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// A text-generation backend: prompt in, plain text out.
pub trait TextGenerator: Send + Sync {
    fn generate(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> impl Future<Output = Result<String>> + Send;
}

#[derive(Debug, Serialize)]
struct MessageRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: Option<String>,
}

pub struct ClaudeClient {
    client: Client,
    api_key: Option<String>,
    model: String,
}

impl ClaudeClient {
    pub fn new(api_key: Option<String>, model: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.anthropic_api_key.clone(),
            config.model.clone(),
            config.generation_timeout(),
        )
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model_version(&self) -> &str {
        &self.model
    }
}

impl TextGenerator for ClaudeClient {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let Some(api_key) = &self.api_key else {
            return Err(AppError::NoApiKey);
        };

        let request = MessageRequest {
            model: self.model.clone(),
            max_tokens,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(CLAUDE_API_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(AppError::ClaudeApi(format!("API error: {}", error_text)));
        }

        let message_response: MessageResponse = response.json().await?;

        let text = message_response
            .content
            .into_iter()
            .filter(|block| block.content_type == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("\n");

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_is_reported_without_a_request() {
        let client =
            ClaudeClient::new(None, "test-model".to_string(), Duration::from_secs(1)).unwrap();
        assert!(!client.is_configured());
        assert_eq!(client.model_version(), "test-model");

        let err = client.generate("hello", 16).await.unwrap_err();
        assert!(matches!(err, AppError::NoApiKey));
    }

    #[test]
    fn response_blocks_deserialize() {
        let body = r#"{"content":[{"type":"text","text":"Hello"},{"type":"tool_use"}]}"#;
        let parsed: MessageResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.content.len(), 2);
        assert_eq!(parsed.content[0].text.as_deref(), Some("Hello"));
        assert!(parsed.content[1].text.is_none());
    }
}
