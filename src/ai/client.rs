//! LLM chat-completion client module
//!
//! Turns reader page text into a summary through an OpenAI-compatible
//! `/chat/completions` endpoint (Zhipu GLM or OpenAI).

use async_trait::async_trait;
use openai_api_rs::v1::chat_completion::{ChatCompletionMessage, Content, MessageRole};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::info;

use super::prompt_builder::{build_chat_messages, build_summary_prompt, truncate_page_text};
use crate::core::config::PluginConfig;
use crate::errors::JinaSumError;

/// Produces a summary for a page's text.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, page_text: &str) -> Result<String, JinaSumError>;
}

/// LLM API client for generating summaries
pub struct LlmClient {
    config: PluginConfig,
    http: Client,
}

impl LlmClient {
    /// # Errors
    ///
    /// Returns `LlmError` if the underlying HTTP client cannot be built.
    pub fn new(config: PluginConfig) -> Result<Self, JinaSumError> {
        // No timeout: the provider client default applies.
        let http = Client::builder()
            .build()
            .map_err(|e| JinaSumError::LlmError(format!("Failed to build LLM HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    /// Builds the two-message chat for a page, cutting the text to `max_words` characters.
    #[must_use]
    pub fn build_prompt(&self, page_text: &str) -> Vec<ChatCompletionMessage> {
        let truncated = truncate_page_text(page_text, self.config.max_words);
        build_chat_messages(build_summary_prompt(&self.config.prompt, truncated))
    }
}

#[async_trait]
impl Summarizer for LlmClient {
    async fn summarize(&self, page_text: &str) -> Result<String, JinaSumError> {
        let target = self.config.resolve_llm()?;
        let prompt = self.build_prompt(page_text);

        #[cfg(feature = "debug-logs")]
        info!("Using summary prompt:\n{:?}", prompt);

        #[cfg(not(feature = "debug-logs"))]
        info!(
            "Requesting summary from {:?} model {} ({} chars of page text)",
            target.provider,
            target.model,
            page_text.chars().count().min(self.config.max_words)
        );

        let request_body = json!({
            "model": target.model,
            "messages": build_chat_input_from_prompt(&prompt),
        });

        let endpoint = format!("{}/chat/completions", target.api_base.trim_end_matches('/'));
        let response = self
            .http
            .post(&endpoint)
            .bearer_auth(&target.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| JinaSumError::LlmError(format!("Chat completion request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(JinaSumError::LlmError(format!(
                "Chat completion returned HTTP {status}: {error_text}"
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            JinaSumError::LlmError(format!("Failed to parse chat completion response: {e}"))
        })?;

        extract_first_choice_text(&response_json)
            .ok_or_else(|| JinaSumError::LlmError("No text in first completion choice".to_string()))
    }
}

pub(crate) fn build_chat_input_from_prompt(prompt: &[ChatCompletionMessage]) -> Vec<Value> {
    prompt
        .iter()
        .map(|m| {
            let role_str = match m.role {
                MessageRole::system => "system",
                MessageRole::user | MessageRole::function | MessageRole::tool => "user",
                MessageRole::assistant => "assistant",
            };

            let content = match &m.content {
                Content::Text(t) => json!(t),
                Content::ImageUrl(_) => json!(""),
            };

            json!({
                "role": role_str,
                "content": content
            })
        })
        .collect()
}

fn extract_first_choice_text(response_json: &Value) -> Option<String> {
    response_json
        .get("choices")
        .and_then(|choices| choices.as_array())
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(ToString::to_string)
}
