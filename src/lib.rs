//! Scripted dialogues between LLM-backed agents.
//!
//! Each agent is described by an [`AgentProfile`] and talks through its own
//! [`ProviderAdapter`]. The [`DialogueOrchestrator`] alternates speakers,
//! accumulates the shared turn history and stops once a
//! [`TerminationDetector`] reports that the participants agreed to meet, or
//! once the turn budget is spent. The finished conversation is written out as
//! a Markdown [`Transcript`].
//!
//! Provider failures never abort a run: adapters degrade to a deterministic
//! local fallback so a dialogue always completes, even fully offline.

pub mod adapter;
pub mod backends;
pub mod chat;
pub mod credentials;
pub mod dialogue;
pub mod error;
pub mod profile;
pub mod termination;
pub mod transcript;

pub use adapter::{FallbackReason, Generation, ProviderAdapter};
pub use credentials::Credentials;
pub use dialogue::{
    ConversationTurn, DialogueOrchestrator, DialogueState, ReplySource, RunOutcome, RunSettings,
};
pub use error::{ConfigError, LLMError};
pub use profile::AgentProfile;
pub use termination::{meeting_agreed, MeetingDetector, TerminationDetector};
pub use transcript::{Transcript, TranscriptWriter};
