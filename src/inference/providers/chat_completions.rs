//! OpenAI-compatible Chat Completions provider.
//!
//! OpenAI, OpenRouter and LM Studio all accept the same
//! `POST {base_url}/chat/completions` body, so one implementation covers
//! every `Provider` variant. Requests are single-shot and non-streaming:
//! the whole answer arrives in one response.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::inference::types::{ChatMessage, ChatRequest, ChatResponse, ErrorEnvelope};
use crate::inference::{CompletionProvider, CompletionRequest, ProviderError};
use crate::Provider;

pub struct ChatCompletionsProvider {
    name: &'static str,
    base_url: String,
    api_key: Option<String>,
    /// Env var to mention when a required key is missing. `None` = no auth needed.
    key_env: Option<&'static str>,
    client: reqwest::Client,
}

impl ChatCompletionsProvider {
    pub fn new(
        provider: Provider,
        base_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout ({e}), using defaults");
                reqwest::Client::new()
            });

        Self {
            name: provider.label(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            key_env: provider.api_key_env(),
            client,
        }
    }

    /// Sends the request and checks the HTTP status.
    async fn send_request(&self, body: &ChatRequest) -> Result<reqwest::Response, ProviderError> {
        let mut builder = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(body);

        match (&self.api_key, self.key_env) {
            (Some(key), _) => builder = builder.bearer_auth(key),
            (None, Some(var)) => {
                return Err(ProviderError::Config(format!(
                    "no API key for {}; set {var} or add api_key to the config file",
                    self.name
                )));
            }
            (None, None) => {}
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("{} response status: {}", self.name, response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("{} API error: {} - {}", self.name, status, body);
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|env| env.error.message)
                .unwrap_or(body);
            return Err(ProviderError::Api { status, message });
        }

        Ok(response)
    }
}

#[async_trait]
impl CompletionProvider for ChatCompletionsProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, ProviderError> {
        let body = ChatRequest {
            model: request.model.to_string(),
            messages: vec![ChatMessage::user(request.prompt)],
            stream: false,
        };

        info!(
            "{} chat completion request: model={}, prompt_len={}",
            self.name,
            request.model,
            request.prompt.len()
        );

        let response = self.send_request(&body).await?;

        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;
        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::Parse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Parse("response contained no choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        info!("{} completion received: {} bytes", self.name, content.len());
        Ok(content)
    }
}
