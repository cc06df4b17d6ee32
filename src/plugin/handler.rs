use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, error, info, warn};

use super::channel::ReplyChannel;
use super::summarize::summarize_link;
use super::{ACK_MESSAGE, CANONICAL_FAILURE_MESSAGE, MAX_RETRIES};
use crate::ai::{LlmClient, Summarizer};
use crate::clients::{JinaReaderClient, PageReader};
use crate::core::config::PluginConfig;
use crate::core::models::{InboundEvent, Reply};
use crate::errors::JinaSumError;
use crate::utils::links::check_url;

/// Summarizes links shared in chat.
///
/// Holds only immutable state, so one instance can serve concurrent events.
pub struct JinaSum {
    config: PluginConfig,
    reader: Arc<dyn PageReader>,
    summarizer: Arc<dyn Summarizer>,
}

impl JinaSum {
    pub fn new(
        config: PluginConfig,
        reader: Arc<dyn PageReader>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            config,
            reader,
            summarizer,
        }
    }

    /// Wires the plugin to the real Jina Reader and LLM endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if either HTTP client cannot be built.
    pub fn from_config(config: PluginConfig) -> Result<Self, JinaSumError> {
        info!("Initializing JinaSum with config: {:?}", config);
        let reader = Arc::new(JinaReaderClient::new()?);
        let summarizer = Arc::new(LlmClient::new(config.clone())?);
        Ok(Self::new(config, reader, summarizer))
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Handles one incoming chat event.
    ///
    /// Returns `None` when the event is not for this plugin (not shareable content,
    /// or not an accepted link). Otherwise acknowledges once on `channel`, tries to
    /// summarize up to `MAX_RETRIES + 1` times without delay, and returns either the
    /// summary or the canonical failure reply. Errors never escape this call.
    pub async fn handle_shared_content(
        &self,
        event: &InboundEvent,
        channel: &dyn ReplyChannel,
    ) -> Option<Reply> {
        if !event.context_type.is_shareable() {
            return None;
        }

        let content = event.content.as_str();
        if !check_url(content, &self.config) {
            debug!("{} is not a valid URL, skipping", content);
            return None;
        }

        debug!("Handling shared content: {}", content);
        if let Err(e) = channel.send(Reply::text(ACK_MESSAGE), event).await {
            warn!("Failed to send acknowledgment: {}", e);
        }

        let reader = self.reader.as_ref();
        let summarizer = self.summarizer.as_ref();
        let config = &self.config;

        let strategy = FixedInterval::new(Duration::ZERO).take(MAX_RETRIES);
        let mut attempt = 0usize;
        let result = Retry::spawn(strategy, || {
            attempt += 1;
            let attempt = attempt;
            async move {
                let outcome = summarize_link(reader, summarizer, config, content).await;
                if let Err(e) = &outcome
                    && attempt <= MAX_RETRIES
                {
                    warn!("{}, retrying {}", e, attempt);
                }
                outcome
            }
        })
        .await;

        match result {
            Ok(summary) => {
                info!("Summary generated for {}", content.trim());
                Some(Reply::text(summary))
            }
            Err(e) => {
                error!("Giving up on {} after {} attempts: {}", content.trim(), attempt, e);
                Some(Reply::error(CANONICAL_FAILURE_MESSAGE))
            }
        }
    }
}
