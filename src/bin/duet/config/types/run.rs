use serde::{Deserialize, Serialize};

use super::{DEFAULT_MAX_MESSAGES, DEFAULT_SUBTITLE, DEFAULT_TITLE, DEFAULT_TRANSCRIPT_PATH};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    pub max_messages: usize,
    pub turn_delay_s: f64,
    pub verbose: bool,
    pub first_speaker: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_messages: DEFAULT_MAX_MESSAGES,
            turn_delay_s: 0.0,
            verbose: true,
            first_speaker: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TranscriptConfig {
    pub path: String,
    pub title: String,
    pub subtitle: Option<String>,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_TRANSCRIPT_PATH.to_string(),
            title: DEFAULT_TITLE.to_string(),
            subtitle: Some(DEFAULT_SUBTITLE.to_string()),
        }
    }
}
