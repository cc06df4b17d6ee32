//! The link-summary plugin: event handling and per-attempt summarization

pub mod channel;
pub mod handler;
pub mod summarize;

// Re-export the main types for convenience
pub use channel::ReplyChannel;
pub use handler::JinaSum;

/// Interim reply sent once per shared link, before the first attempt.
pub const ACK_MESSAGE: &str = "🎉正在为您生成总结，请稍候...";

/// Canonical failure message shown to users when every attempt failed.
pub const CANONICAL_FAILURE_MESSAGE: &str = "我暂时无法总结链接，请稍后再试";

/// Retries after the first failed attempt; a link is tried at most `MAX_RETRIES + 1` times.
pub const MAX_RETRIES: usize = 3;

/// Registration details a host adapter needs to list the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: &'static str,
    pub desc: &'static str,
    pub version: &'static str,
    pub author: &'static str,
    pub desire_priority: i32,
    pub hidden: bool,
}

pub const PLUGIN_INFO: PluginInfo = PluginInfo {
    name: "junSummary",
    desc: "Sum url link content with jina reader and llm",
    version: "0.0.1",
    author: "sllt",
    desire_priority: 10,
    hidden: false,
};

#[must_use]
pub fn help_text(verbose: bool) -> String {
    let mut text = "使用Jina Reader、OpenAI或智谱总结网页链接内容".to_string();
    if verbose {
        text.push_str("\n直接分享链接或发送以 http:// 或 https:// 开头的网址即可获取总结");
    }
    text
}
