// Command-line host adapter: runs the plugin once against a link and prints
// every reply the plugin produces to stdout.

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use jina_sum::core::config::PluginConfig;
use jina_sum::core::models::{ContextType, InboundEvent, Reply, ReplyKind};
use jina_sum::plugin::{PLUGIN_INFO, help_text};
use jina_sum::{JinaSum, ReplyChannel};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "jina-sum", version, about = "Summarize a web page with Jina Reader and an LLM")]
struct Cli {
    /// Link to summarize, exactly as it would be shared in chat
    url: Option<String>,

    /// Plugin config.json; environment variables are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Treat the input as plain text instead of a link share
    #[arg(long)]
    text: bool,
}

struct StdoutChannel;

#[async_trait]
impl ReplyChannel for StdoutChannel {
    async fn send(&self, reply: Reply, _event: &InboundEvent) -> Result<()> {
        println!("{}", reply.content);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    jina_sum::setup_logging();
    let cli = Cli::parse();

    let Some(url) = cli.url else {
        println!("{} {}\n{}", PLUGIN_INFO.name, PLUGIN_INFO.version, help_text(true));
        return Ok(());
    };

    let config = match &cli.config {
        Some(path) => PluginConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => PluginConfig::from_env().map_err(anyhow::Error::msg)?,
    };

    let plugin = JinaSum::from_config(config)?;
    let context_type = if cli.text {
        ContextType::Text
    } else {
        ContextType::Sharing
    };
    let event = InboundEvent::new(context_type, url);

    match plugin.handle_shared_content(&event, &StdoutChannel).await {
        Some(reply) if reply.kind == ReplyKind::Error => {
            eprintln!("{}", reply.content);
            std::process::exit(1);
        }
        Some(reply) => println!("{}", reply.content),
        None => eprintln!("Input is not a link this plugin accepts"),
    }

    Ok(())
}
