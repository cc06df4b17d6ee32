use tracing::debug;

use crate::ai::Summarizer;
use crate::clients::PageReader;
use crate::core::config::PluginConfig;
use crate::errors::JinaSumError;
use crate::utils::links::{build_reader_url, unescape_shared_url};

/// One attempt at summarizing shared content: unescape, read, summarize.
pub async fn summarize_link(
    reader: &dyn PageReader,
    summarizer: &dyn Summarizer,
    config: &PluginConfig,
    content: &str,
) -> Result<String, JinaSumError> {
    let target_url = unescape_shared_url(content);
    let reader_url = build_reader_url(&target_url, &config.jina_reader_base);
    debug!("Reading {} via {}", target_url, reader_url);

    let page_text = reader.fetch_page_text(&reader_url).await?;
    summarizer.summarize(&page_text).await
}
