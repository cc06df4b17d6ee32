/// JinaSum - a chat-bot plugin that summarizes shared web links.
///
/// When a user shares a link, the plugin reads the page through the Jina Reader
/// service, sends the text to an LLM chat-completion API (Zhipu GLM or OpenAI)
/// with a summary prompt, and replies with the result.
///
/// # Architecture
///
/// The plugin is a plain component: a host adapter constructs [`JinaSum`] with its
/// [`PluginConfig`] and calls [`JinaSum::handle_shared_content`] for each incoming
/// event. Outbound calls go through three async seams:
/// - [`PageReader`] for the reader service (`JinaReaderClient`)
/// - [`Summarizer`] for the LLM (`LlmClient`)
/// - [`ReplyChannel`] for the interim acknowledgment sent back to the chat
///
/// # Example
///
/// ```no_run
/// use async_trait::async_trait;
/// use jina_sum::core::config::PluginConfig;
/// use jina_sum::core::models::{ContextType, InboundEvent, Reply};
/// use jina_sum::{JinaSum, ReplyChannel};
///
/// struct Stdout;
///
/// #[async_trait]
/// impl ReplyChannel for Stdout {
///     async fn send(&self, reply: Reply, _event: &InboundEvent) -> anyhow::Result<()> {
///         println!("{}", reply.content);
///         Ok(())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     jina_sum::setup_logging();
///
///     let config = PluginConfig {
///         zhipu_api_key: "dummy_zhipu_key".to_string(),
///         ..PluginConfig::default()
///     };
///     let plugin = JinaSum::from_config(config)?;
///
///     let event = InboundEvent::new(ContextType::Sharing, "https://example.com/article");
///     if let Some(reply) = plugin.handle_shared_content(&event, &Stdout).await {
///         println!("{:?}: {}", reply.kind, reply.content);
///     }
///
///     Ok(())
/// }
/// ```
// Module declarations
pub mod ai;
pub mod clients;
pub mod core;
pub mod errors;
pub mod plugin;
pub mod utils;

pub use crate::ai::{LlmClient, Summarizer};
pub use crate::clients::{JinaReaderClient, PageReader};
pub use crate::core::config::PluginConfig;
pub use crate::errors::JinaSumError;
pub use crate::plugin::{JinaSum, ReplyChannel};

/// Configure structured logging with JSON format.
///
/// Sets up tracing-subscriber with a JSON formatter so plugin logs can be
/// collected alongside the host's. Call it once from the host adapter; a
/// second call is ignored.
///
/// # Example
///
/// ```
/// jina_sum::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}
