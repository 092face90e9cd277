//! Chat-completion backends.

use std::future::Future;

use serde::{Deserialize, Serialize};

use super::TestGenError;
use crate::config::TestGenConfig;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// Body of a `POST /chat/completions` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Something that turns a chat request into the assistant's reply text.
pub trait CompletionBackend: Send + Sync {
    fn complete(&self, request: &ChatRequest) -> impl Future<Output = Result<String, TestGenError>> + Send;
}

/// An OpenAI-compatible HTTP endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiBackend {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
        }
    }

    /// Build from configuration, reading the key through `env` when it is not configured.
    pub fn from_config(config: &TestGenConfig, env: impl Fn(&str) -> Option<String>) -> Result<Self, TestGenError> {
        let key = config.resolve_api_key(env).ok_or(TestGenError::MissingApiKey)?;
        Ok(Self::new(&config.base_url, key))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, request: &ChatRequest) -> Result<String, TestGenError> {
        tracing::debug!(endpoint = %self.endpoint, model = %request.model, "chat completion request");
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TestGenError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(TestGenError::EmptyResponse)
    }
}
