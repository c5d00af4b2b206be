use serde::{Deserialize, Serialize};

use duet::profile::DEFAULT_TIMEOUT_SECONDS;
use duet::AgentProfile;

use super::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AgentConfig {
    pub name: String,
    pub system: String,
    pub model: String,
    pub base_url: Option<String>,
    pub api_key_env: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub opening: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            system: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
            api_key_env: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            opening: None,
            timeout_seconds: Some(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

impl AgentConfig {
    pub fn persona(name: &str, system: &str) -> Self {
        Self {
            name: name.to_string(),
            system: system.to_string(),
            ..Default::default()
        }
    }

    pub fn to_profile(&self) -> AgentProfile {
        let mut builder = AgentProfile::builder(self.name.trim(), self.model.trim())
            .system_prompt(self.system.clone())
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .timeout_seconds(self.timeout_seconds);
        if let Some(url) = non_blank(&self.base_url) {
            builder = builder.base_url(url);
        }
        if let Some(selector) = non_blank(&self.api_key_env) {
            builder = builder.api_key_env(selector);
        }
        if let Some(opening) = non_blank(&self.opening) {
            builder = builder.opening(opening);
        }
        builder.build()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_optional_fields_are_dropped() {
        let config = AgentConfig {
            base_url: Some("".to_string()),
            api_key_env: Some("  ".to_string()),
            opening: Some("Diz olá.".to_string()),
            ..AgentConfig::persona("Ana", "persona")
        };
        let profile = config.to_profile();
        assert_eq!(profile.base_url, None);
        assert_eq!(profile.api_key_env, None);
        assert_eq!(profile.opening.as_deref(), Some("Diz olá."));
        assert_eq!(profile.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(profile.timeout_seconds, Some(DEFAULT_TIMEOUT_SECONDS));
    }
}
