use serde::Deserialize;
use std::env;
use std::fmt;
use std::path::Path;

use crate::errors::JinaSumError;

pub const DEFAULT_JINA_READER_BASE: &str = "https://r.jina.ai";
pub const DEFAULT_OPEN_AI_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPEN_AI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_ZHIPU_API_BASE: &str = "https://open.bigmodel.cn/api/paas/v4";
pub const DEFAULT_ZHIPU_MODEL: &str = "glm-4-flash";
pub const DEFAULT_MAX_WORDS: usize = 8000;
pub const DEFAULT_PROMPT: &str = "我需要对下面引号内文档进行总结，总结输出包括以下三个部分：\n📖 一句话总结\n🔑 关键要点,用数字序号列出3-5个文章的核心内容\n🏷 标签: #xx #xx\n请使用emoji让你的表达更生动\n\n";

/// Channels video and channels music share pages; the reader cannot render them.
pub const DEFAULT_BLACK_URL_LIST: [&str; 2] = [
    "https://support.weixin.qq.com",
    "https://channels-aladin.wxqcloud.qq.com",
];

/// Plugin configuration, loaded once and immutable for the lifetime of the plugin.
///
/// Every field has a default so a partial `config.json` is accepted.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    pub jina_reader_base: String,
    pub open_ai_api_key: String,
    pub open_ai_api_base: String,
    pub open_ai_model: String,
    pub zhipu_api_key: String,
    pub zhipu_api_base: String,
    pub zhipu_model: String,
    pub max_words: usize,
    pub prompt: String,
    pub white_url_list: Vec<String>,
    pub black_url_list: Vec<String>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            jina_reader_base: DEFAULT_JINA_READER_BASE.to_string(),
            open_ai_api_key: String::new(),
            open_ai_api_base: DEFAULT_OPEN_AI_API_BASE.to_string(),
            open_ai_model: DEFAULT_OPEN_AI_MODEL.to_string(),
            zhipu_api_key: String::new(),
            zhipu_api_base: DEFAULT_ZHIPU_API_BASE.to_string(),
            zhipu_model: DEFAULT_ZHIPU_MODEL.to_string(),
            max_words: DEFAULT_MAX_WORDS,
            prompt: DEFAULT_PROMPT.to_string(),
            white_url_list: Vec::new(),
            black_url_list: DEFAULT_BLACK_URL_LIST
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

// Keys must never reach the logs.
impl fmt::Debug for PluginConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginConfig")
            .field("jina_reader_base", &self.jina_reader_base)
            .field("open_ai_api_key", &redact(&self.open_ai_api_key))
            .field("open_ai_api_base", &self.open_ai_api_base)
            .field("open_ai_model", &self.open_ai_model)
            .field("zhipu_api_key", &redact(&self.zhipu_api_key))
            .field("zhipu_api_base", &self.zhipu_api_base)
            .field("zhipu_model", &self.zhipu_model)
            .field("max_words", &self.max_words)
            .field("prompt", &self.prompt)
            .field("white_url_list", &self.white_url_list)
            .field("black_url_list", &self.black_url_list)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "<unset>" } else { "<redacted>" }
}

/// The chat-completions endpoint a summary request is sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmProvider {
    Zhipu,
    OpenAi,
}

#[derive(Clone, PartialEq, Eq)]
pub struct LlmTarget {
    pub provider: LlmProvider,
    pub api_key: String,
    pub api_base: String,
    pub model: String,
}

impl fmt::Debug for LlmTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmTarget")
            .field("provider", &self.provider)
            .field("api_key", &redact(&self.api_key))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl PluginConfig {
    /// # Errors
    ///
    /// Returns `ConfigError` if the document is not valid JSON or a field has the wrong type.
    pub fn from_json_str(raw: &str) -> Result<Self, JinaSumError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, JinaSumError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Reads the same keys from upper-cased environment variables. List values are
    /// comma separated.
    ///
    /// # Errors
    ///
    /// Returns an error if `MAX_WORDS` is set but is not a positive integer.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();
        let max_words = match env::var("MAX_WORDS") {
            Ok(raw) => parse_max_words(&raw)?,
            Err(_) => defaults.max_words,
        };

        Ok(Self {
            jina_reader_base: env::var("JINA_READER_BASE").unwrap_or(defaults.jina_reader_base),
            open_ai_api_key: env::var("OPEN_AI_API_KEY").unwrap_or_default(),
            open_ai_api_base: env::var("OPEN_AI_API_BASE").unwrap_or(defaults.open_ai_api_base),
            open_ai_model: env::var("OPEN_AI_MODEL").unwrap_or(defaults.open_ai_model),
            zhipu_api_key: env::var("ZHIPU_API_KEY").unwrap_or_default(),
            zhipu_api_base: env::var("ZHIPU_API_BASE").unwrap_or(defaults.zhipu_api_base),
            zhipu_model: env::var("ZHIPU_MODEL").unwrap_or(defaults.zhipu_model),
            max_words,
            prompt: env::var("PROMPT").unwrap_or(defaults.prompt),
            white_url_list: env::var("WHITE_URL_LIST")
                .map(|raw| split_list(&raw))
                .unwrap_or(defaults.white_url_list),
            black_url_list: env::var("BLACK_URL_LIST")
                .map(|raw| split_list(&raw))
                .unwrap_or(defaults.black_url_list),
        })
    }

    /// Picks the provider to summarize with: Zhipu when its key is set, OpenAI otherwise.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when neither API key is configured.
    pub fn resolve_llm(&self) -> Result<LlmTarget, JinaSumError> {
        if !self.zhipu_api_key.trim().is_empty() {
            return Ok(LlmTarget {
                provider: LlmProvider::Zhipu,
                api_key: self.zhipu_api_key.trim().to_string(),
                api_base: self.zhipu_api_base.clone(),
                model: self.zhipu_model.clone(),
            });
        }

        if !self.open_ai_api_key.trim().is_empty() {
            return Ok(LlmTarget {
                provider: LlmProvider::OpenAi,
                api_key: self.open_ai_api_key.trim().to_string(),
                api_base: self.open_ai_api_base.clone(),
                model: self.open_ai_model.clone(),
            });
        }

        Err(JinaSumError::ConfigError(
            "no LLM API key configured (set zhipu_api_key or open_ai_api_key)".to_string(),
        ))
    }
}

fn parse_max_words(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err("MAX_WORDS: must be greater than zero".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("MAX_WORDS: {}", e)),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}
