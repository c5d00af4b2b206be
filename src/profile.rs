//! Static description of one conversational participant.

use crate::error::ConfigError;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 400;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
const MAX_TEMPERATURE: f32 = 2.0;

/// Persona, model and generation parameters for one agent.
///
/// Profiles are immutable once handed to a
/// [`DialogueOrchestrator`](crate::DialogueOrchestrator).
#[derive(Debug, Clone, PartialEq)]
pub struct AgentProfile {
    /// Display name, unique among the participants of a dialogue.
    pub name: String,
    /// System instruction framing the persona.
    pub system_prompt: String,
    /// Model identifier sent to the provider.
    pub model: String,
    /// Custom endpoint root; the provider default is used when absent.
    pub base_url: Option<String>,
    /// Name of the credential to use (e.g. `GROQ_API_KEY`).
    pub api_key_env: Option<String>,
    /// Sampling temperature (0.0 - 2.0).
    pub temperature: f32,
    /// Maximum tokens to generate per reply.
    pub max_tokens: u32,
    /// Kickoff instruction, used only for this agent's very first turn when
    /// nobody has spoken yet.
    pub opening: Option<String>,
    /// Request timeout enforced by the HTTP client.
    pub timeout_seconds: Option<u64>,
}

impl AgentProfile {
    /// Creates a new builder for a profile.
    #[must_use]
    pub fn builder(name: impl Into<String>, model: impl Into<String>) -> AgentProfileBuilder {
        AgentProfileBuilder::new(name, model)
    }

    /// Checks the bounds that must hold before a dialogue starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyAgentName);
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel(self.name.clone()));
        }
        if !(0.0..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(ConfigError::InvalidTemperature {
                agent: self.name.clone(),
                value: self.temperature,
            });
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::InvalidMaxTokens(self.name.clone()));
        }
        Ok(())
    }
}

/// Builder for agent profiles.
#[derive(Debug)]
pub struct AgentProfileBuilder {
    profile: AgentProfile,
}

impl AgentProfileBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            profile: AgentProfile {
                name: name.into(),
                system_prompt: String::new(),
                model: model.into(),
                base_url: None,
                api_key_env: None,
                temperature: DEFAULT_TEMPERATURE,
                max_tokens: DEFAULT_MAX_TOKENS,
                opening: None,
                timeout_seconds: Some(DEFAULT_TIMEOUT_SECONDS),
            },
        }
    }

    /// Sets the system prompt.
    #[must_use]
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.profile.system_prompt = prompt.into();
        self
    }

    /// Sets a custom endpoint.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.profile.base_url = Some(url.into());
        self
    }

    /// Sets the credential selector.
    #[must_use]
    pub fn api_key_env(mut self, name: impl Into<String>) -> Self {
        self.profile.api_key_env = Some(name.into());
        self
    }

    /// Sets the temperature.
    #[must_use]
    pub fn temperature(mut self, temp: f32) -> Self {
        self.profile.temperature = temp;
        self
    }

    /// Sets the max tokens.
    #[must_use]
    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.profile.max_tokens = tokens;
        self
    }

    /// Sets the first-turn kickoff instruction.
    #[must_use]
    pub fn opening(mut self, opening: impl Into<String>) -> Self {
        self.profile.opening = Some(opening.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn timeout_seconds(mut self, seconds: Option<u64>) -> Self {
        self.profile.timeout_seconds = seconds;
        self
    }

    /// Builds the profile.
    #[must_use]
    pub fn build(self) -> AgentProfile {
        self.profile
    }
}
