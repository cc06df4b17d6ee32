use serde::{Deserialize, Serialize};

/// Classification the host assigns to an incoming chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContextType {
    Text,
    Sharing,
    Voice,
    Image,
    File,
    Video,
}

impl ContextType {
    /// Only link shares and plain text can carry a URL worth summarizing.
    #[must_use]
    pub fn is_shareable(self) -> bool {
        matches!(self, ContextType::Sharing | ContextType::Text)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundEvent {
    pub context_type: ContextType,
    pub content: String,
}

impl InboundEvent {
    pub fn new(context_type: ContextType, content: impl Into<String>) -> Self {
        Self {
            context_type,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReplyKind {
    Text,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub kind: ReplyKind,
    pub content: String,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Text,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            kind: ReplyKind::Error,
            content: content.into(),
        }
    }
}
