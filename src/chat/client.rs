//! Chat-completions API client.

use log::debug;

use crate::config::ChatConfig;
use crate::error_handling::{ChatError, InitializationError};
use crate::initialization::init_client;

use super::types::{ChatMessage, CompletionRequest, CompletionResponse};

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
///
/// Each call is a single blocking request/response; no conversation state is kept.
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    /// Creates a client from `config` with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ChatConfig, api_key: String) -> Result<Self, InitializationError> {
        Ok(Self {
            http: init_client(config.timeout_seconds)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
        })
    }

    /// Model requests are sent to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `messages` and returns the first choice's text.
    ///
    /// # Errors
    ///
    /// - `ChatError::Request` if the request cannot be sent or the body is not JSON
    /// - `ChatError::Api` if the API answers with a non-success status
    /// - `ChatError::EmptyResponse` if the answer contains no text
    pub async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ChatError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!("POST {url} ({} messages, model {})", messages.len(), self.model);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                model: &self.model,
                messages,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: CompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ChatError::EmptyResponse)
    }

    /// Sends a single user message and returns the reply.
    pub async fn ask(&self, prompt: &str) -> Result<String, ChatError> {
        self.complete(&[ChatMessage::user(prompt)]).await
    }
}
