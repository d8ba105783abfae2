// src/suggest/provider.rs
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::core::config::Config;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Model output is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A text-generation backend able to answer a prompt with an object shaped
/// like the given JSON Schema.
///
/// `Ok(None)` means the backend answered but produced no output at all.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Provider: Send + Sync {
    async fn generate(&self, prompt: &str, schema: &Value) -> Result<Option<Value>, ProviderError>;

    /// Model identifier, for status reporting.
    fn model(&self) -> String;
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Provider for any OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatCompletionsProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl ChatCompletionsProvider {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        model: String,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key,
            model,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        Self::new(
            &config.model_api_base_url,
            config.model_api_key.clone(),
            config.model_name.clone(),
            config.model_timeout,
        )
    }

    fn request_body<'a>(&'a self, prompt: &'a str, schema: &Value) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            response_format: json!({
                "type": "json_schema",
                "json_schema": {
                    "name": "suggest_password_output",
                    "schema": schema,
                }
            }),
        }
    }
}

#[async_trait]
impl Provider for ChatCompletionsProvider {
    async fn generate(&self, prompt: &str, schema: &Value) -> Result<Option<Value>, ProviderError> {
        debug!("Calling model '{}' at {}", self.model, self.endpoint);

        let mut request = self.client.post(&self.endpoint).json(&self.request_body(prompt, schema));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Model API responded with {}", status);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let chat: ChatResponse = response.json().await?;
        parse_content(chat)
    }

    fn model(&self) -> String {
        self.model.clone()
    }
}

fn parse_content(chat: ChatResponse) -> Result<Option<Value>, ProviderError> {
    let content = chat
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty());

    match content {
        Some(content) => Ok(Some(serde_json::from_str(strip_code_fence(&content))?)),
        None => Ok(None),
    }
}

// Some backends wrap JSON answers in a markdown fence even in JSON mode.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}
