use thiserror::Error;

#[derive(Debug, Error)]
pub enum JinaSumError {
    #[error("Failed to fetch page from reader service: {0}")]
    FetchError(String),

    #[error("Invalid plugin configuration: {0}")]
    ConfigError(String),

    #[error("Failed to access LLM API: {0}")]
    LlmError(String),
}

impl From<serde_json::Error> for JinaSumError {
    fn from(error: serde_json::Error) -> Self {
        JinaSumError::ConfigError(error.to_string())
    }
}

impl From<std::io::Error> for JinaSumError {
    fn from(error: std::io::Error) -> Self {
        JinaSumError::ConfigError(error.to_string())
    }
}
