//! Dialogue orchestrator driving a run from first turn to a terminal state.

use std::collections::HashSet;
use std::fmt;

use crate::adapter::ProviderAdapter;
use crate::chat::{ChatMessage, ChatRole};
use crate::error::ConfigError;
use crate::profile::AgentProfile;
use crate::termination::{MeetingDetector, TerminationDetector};
use crate::transcript::Transcript;

use super::turn::{ConversationTurn, ReplySource};
use super::RunSettings;

/// Kickoff used when the first speaker has no opening instruction.
pub const DEFAULT_OPENING: &str = "Começa a conversa de forma natural.";
/// Stored instead of a reply that is empty after trimming.
pub const EMPTY_REPLY_PLACEHOLDER: &str = "...";

/// State of the dialogue. Both terminal states are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogueState {
    #[default]
    Running,
    TerminatedByAgreement,
    TerminatedByBudget,
}

impl DialogueState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, DialogueState::Running)
    }
}

impl fmt::Display for DialogueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::TerminatedByAgreement => write!(f, "meeting agreed"),
            Self::TerminatedByBudget => write!(f, "turn budget exhausted"),
        }
    }
}

/// Summary returned by [`DialogueOrchestrator::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub state: DialogueState,
    pub turns: usize,
}

/// An agent together with its provider adapter.
pub struct Participant {
    pub profile: AgentProfile,
    pub adapter: ProviderAdapter,
}

impl Participant {
    pub fn new(profile: AgentProfile, adapter: ProviderAdapter) -> Self {
        Self { profile, adapter }
    }
}

impl fmt::Debug for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Participant")
            .field("name", &self.profile.name)
            .field("model", &self.profile.model)
            .field("adapter", &self.adapter)
            .finish()
    }
}

/// Single writer of the turn history; alternates speakers round-robin.
pub struct DialogueOrchestrator {
    participants: Vec<Participant>,
    settings: RunSettings,
    detector: Box<dyn TerminationDetector>,
    turns: Vec<ConversationTurn>,
    current_index: usize,
    state: DialogueState,
}

impl DialogueOrchestrator {
    /// Validates the setup and prepares a run.
    ///
    /// Rejects fewer than two participants, duplicate or blank names,
    /// out-of-range profile parameters, a zero turn budget and an unknown
    /// first speaker.
    pub fn new(participants: Vec<Participant>, settings: RunSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        if participants.len() < 2 {
            return Err(ConfigError::TooFewAgents(participants.len()));
        }

        let mut seen = HashSet::new();
        for participant in &participants {
            participant.profile.validate()?;
            if !seen.insert(participant.profile.name.as_str()) {
                return Err(ConfigError::DuplicateAgent(participant.profile.name.clone()));
            }
        }

        let current_index = match &settings.first_speaker {
            Some(name) => participants
                .iter()
                .position(|p| &p.profile.name == name)
                .ok_or_else(|| ConfigError::UnknownSpeaker(name.clone()))?,
            None => 0,
        };

        Ok(Self {
            participants,
            settings,
            detector: Box::new(MeetingDetector),
            turns: Vec::new(),
            current_index,
            state: DialogueState::Running,
        })
    }

    /// Replaces the stop condition.
    #[must_use]
    pub fn with_detector(mut self, detector: Box<dyn TerminationDetector>) -> Self {
        self.detector = detector;
        self
    }

    pub const fn state(&self) -> DialogueState {
        self.state
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Name of the agent who speaks next.
    pub fn current_speaker(&self) -> &str {
        &self.participants[self.current_index].profile.name
    }

    /// Builds the message context for the participant at `index`.
    ///
    /// The system instruction always comes first. Before anyone has spoken
    /// the speaker's opening instruction (or [`DEFAULT_OPENING`]) is the only
    /// other message; afterwards the full history is replayed, with the
    /// speaker's own turns as `assistant` and everyone else's as `user`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn build_context(&self, index: usize) -> Vec<ChatMessage> {
        let speaker = &self.participants[index].profile;
        let mut messages = Vec::with_capacity(self.turns.len() + 1);
        messages.push(
            ChatMessage::system()
                .content(speaker.system_prompt.clone())
                .build(),
        );

        if self.turns.is_empty() {
            let opening = speaker
                .opening
                .as_deref()
                .filter(|o| !o.trim().is_empty())
                .unwrap_or(DEFAULT_OPENING);
            messages.push(ChatMessage::user().content(opening).build());
            return messages;
        }

        for turn in &self.turns {
            let role = if turn.speaker == speaker.name {
                ChatRole::Assistant
            } else {
                ChatRole::User
            };
            messages.push(ChatMessage {
                role,
                content: turn.text.clone(),
            });
        }
        messages
    }

    /// Produces one turn and returns the resulting state. Does nothing once
    /// a terminal state is reached.
    pub async fn step(&mut self) -> DialogueState {
        if self.state.is_terminal() {
            return self.state;
        }

        let index = self.current_index;
        let context = self.build_context(index);
        let participant = &self.participants[index];
        let generation = participant.adapter.generate(&context).await;

        let source = if generation.is_fallback() {
            ReplySource::Fallback
        } else {
            ReplySource::Provider
        };
        let mut text = generation.into_text().trim().to_string();
        if text.is_empty() {
            log::warn!(
                "{}: empty reply, storing placeholder",
                participant.profile.name
            );
            text = EMPTY_REPLY_PLACEHOLDER.to_string();
        }

        let turn = ConversationTurn::new(participant.profile.name.clone(), text).with_source(source);
        if self.settings.verbose {
            println!("{}: {}", turn.speaker, turn.text);
        }
        log::debug!(
            "turn {} by {} ({:?}, {} chars)",
            self.turns.len() + 1,
            turn.speaker,
            turn.source,
            turn.text.chars().count()
        );
        self.turns.push(turn);

        if self.detector.detect(&self.turns) {
            self.state = DialogueState::TerminatedByAgreement;
        } else if self.turns.len() >= self.settings.max_turns {
            self.state = DialogueState::TerminatedByBudget;
        } else {
            self.current_index = (index + 1) % self.participants.len();
        }

        if self.state.is_terminal() {
            log::info!(
                "dialogue stopped after {} turns: {}",
                self.turns.len(),
                self.state
            );
        }
        self.state
    }

    /// Runs until agreement or until the turn budget is spent, pausing
    /// `turn_delay` between turns.
    pub async fn run(&mut self) -> RunOutcome {
        while !self.state.is_terminal() {
            let state = self.step().await;
            if !state.is_terminal() && !self.settings.turn_delay.is_zero() {
                tokio::time::sleep(self.settings.turn_delay).await;
            }
        }
        RunOutcome {
            state: self.state,
            turns: self.turns.len(),
        }
    }

    /// Read-only snapshot of the conversation for export.
    pub fn transcript(&self, title: impl Into<String>, subtitle: Option<String>) -> Transcript {
        Transcript::new(title, subtitle, self.turns.clone())
    }
}

impl fmt::Debug for DialogueOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogueOrchestrator")
            .field("participants", &self.participants.len())
            .field("state", &self.state)
            .field("current_index", &self.current_index)
            .field("turns", &self.turns.len())
            .finish()
    }
}
