//! Per-agent wrapper around a remote chat provider.
//!
//! A [`ProviderAdapter`] turns a message history into one reply. It never
//! fails: missing credentials put it in a permanently disabled mode, and
//! request failures become [`Generation::Fallback`] values carrying the
//! reason, so the dialogue always progresses.

mod fallback;

use std::fmt;

use crate::{
    backends::OpenAICompatible,
    chat::{ChatMessage, ChatProvider},
    credentials::Credentials,
    profile::AgentProfile,
};

pub use fallback::{fallback_reply, SCHEDULING_REPLY, SMALL_TALK_REPLY};

/// Longest provider error detail carried into a turn's inline note.
pub const MAX_NOTE_DETAIL_CHARS: usize = 120;

/// Why a fallback reply was produced instead of a provider answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// The adapter has no usable provider for its whole lifetime.
    Disabled(String),
    /// The provider was called and failed.
    ProviderError(String),
}

impl FallbackReason {
    /// Inline note appended to the fallback text. Provider details are cut
    /// to their first non-blank line and [`MAX_NOTE_DETAIL_CHARS`].
    pub fn note(&self) -> String {
        match self {
            FallbackReason::Disabled(_) => "(stub)".to_string(),
            FallbackReason::ProviderError(detail) => {
                format!("(provider error: {})", short_detail(detail))
            }
        }
    }
}

fn short_detail(detail: &str) -> String {
    let line = detail
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default();
    if line.chars().count() <= MAX_NOTE_DETAIL_CHARS {
        return line.to_string();
    }
    let cut: String = line.chars().take(MAX_NOTE_DETAIL_CHARS).collect();
    format!("{}…", cut.trim_end())
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Disabled(why) => write!(f, "provider disabled: {why}"),
            FallbackReason::ProviderError(detail) => write!(f, "provider error: {detail}"),
        }
    }
}

/// Outcome of one [`ProviderAdapter::generate`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// Text produced by the remote provider.
    Reply(String),
    /// Locally synthesised text, annotated with a diagnostic note.
    Fallback { text: String, reason: FallbackReason },
}

impl Generation {
    pub fn text(&self) -> &str {
        match self {
            Generation::Reply(text) => text,
            Generation::Fallback { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Generation::Reply(text) => text,
            Generation::Fallback { text, .. } => text,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Generation::Fallback { .. })
    }
}

enum Mode {
    Enabled(Box<dyn ChatProvider>),
    Disabled(String),
}

/// Stateless bridge between one agent and its provider.
pub struct ProviderAdapter {
    agent: String,
    mode: Mode,
}

impl ProviderAdapter {
    /// Builds an adapter for `profile`, looking its credential up in
    /// `credentials`.
    ///
    /// A missing credential or a client that cannot be constructed leaves
    /// the adapter disabled; it is never retried.
    pub fn new(profile: &AgentProfile, credentials: &Credentials) -> Self {
        let Some(selector) = profile.api_key_env.as_deref().filter(|s| !s.is_empty()) else {
            return Self::disabled(&profile.name, "no credential selector configured");
        };
        let Some(key) = credentials.get(selector) else {
            return Self::disabled(&profile.name, format!("credential {selector} not found"));
        };

        let base_url = profile.base_url.as_deref().filter(|u| !u.trim().is_empty());
        match OpenAICompatible::new(
            key.clone(),
            base_url,
            profile.model.clone(),
            Some(profile.max_tokens),
            Some(profile.temperature),
            profile.timeout_seconds,
        ) {
            Ok(client) => {
                log::debug!(
                    "{}: using model {} at {}",
                    profile.name,
                    profile.model,
                    client.base_url()
                );
                Self::with_provider(&profile.name, Box::new(client))
            }
            Err(err) => Self::disabled(&profile.name, format!("client setup failed: {err}")),
        }
    }

    /// Wraps an already constructed provider.
    pub fn with_provider(agent: impl Into<String>, provider: Box<dyn ChatProvider>) -> Self {
        Self {
            agent: agent.into(),
            mode: Mode::Enabled(provider),
        }
    }

    /// Creates an adapter that only ever answers from the local fallback.
    pub fn disabled(agent: impl Into<String>, reason: impl Into<String>) -> Self {
        let agent = agent.into();
        let reason = reason.into();
        log::warn!("{agent}: provider disabled ({reason}), using local fallback replies");
        Self {
            agent,
            mode: Mode::Disabled(reason),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.mode, Mode::Enabled(_))
    }

    /// Produces one reply for `messages`. Never returns an error.
    pub async fn generate(&self, messages: &[ChatMessage]) -> Generation {
        let provider = match &self.mode {
            Mode::Enabled(provider) => provider,
            Mode::Disabled(why) => {
                return Self::fallback(messages, FallbackReason::Disabled(why.clone()));
            }
        };

        match provider.chat(messages).await {
            Ok(response) => {
                if let Some(usage) = response.usage() {
                    log::debug!(
                        "{}: {} prompt + {} completion tokens",
                        self.agent,
                        usage.prompt_tokens,
                        usage.completion_tokens
                    );
                }
                match response.text() {
                    Some(text) => Generation::Reply(text.trim().to_string()),
                    None => {
                        log::warn!("{}: provider returned no text", self.agent);
                        Self::fallback(
                            messages,
                            FallbackReason::ProviderError("empty response".to_string()),
                        )
                    }
                }
            }
            Err(err) => {
                log::warn!("{}: provider call failed: {err}", self.agent);
                Self::fallback(messages, FallbackReason::ProviderError(err.to_string()))
            }
        }
    }

    fn fallback(messages: &[ChatMessage], reason: FallbackReason) -> Generation {
        Generation::Fallback {
            text: fallback_reply(messages, &reason.note()),
            reason,
        }
    }
}

impl fmt::Debug for ProviderAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match &self.mode {
            Mode::Enabled(_) => "enabled".to_string(),
            Mode::Disabled(why) => format!("disabled ({why})"),
        };
        f.debug_struct("ProviderAdapter")
            .field("agent", &self.agent)
            .field("mode", &mode)
            .finish()
    }
}
