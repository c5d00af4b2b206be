use serde::{Deserialize, Serialize};

/// Where the text of a turn came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    /// Generated by the agent's remote provider.
    #[default]
    Provider,
    /// Synthesised locally because the provider was disabled or failed.
    Fallback,
}

/// One speaker-attributed message. Its position in the orchestrator's turn
/// list is its sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Name of the agent who spoke.
    pub speaker: String,
    /// Non-empty, trimmed content.
    pub text: String,
    #[serde(default)]
    pub source: ReplySource,
}

impl ConversationTurn {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            source: ReplySource::Provider,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: ReplySource) -> Self {
        self.source = source;
        self
    }
}
