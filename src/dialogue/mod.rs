//! Turn-taking between agents.
//!
//! The [`DialogueOrchestrator`] owns the append-only turn list, alternates
//! speakers round-robin and stops on agreement or when the budget is spent.

use std::time::Duration;

use crate::error::ConfigError;

mod controller;
mod turn;

pub use controller::{
    DialogueOrchestrator, DialogueState, Participant, RunOutcome, DEFAULT_OPENING,
    EMPTY_REPLY_PLACEHOLDER,
};
pub use turn::{ConversationTurn, ReplySource};

pub const DEFAULT_MAX_TURNS: usize = 50;

/// Run-level knobs, fixed for the lifetime of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    /// Maximum number of turns across all agents.
    pub max_turns: usize,
    /// Pause between turns, to stay under provider rate limits.
    pub turn_delay: Duration,
    /// Echo each turn to stdout as `<speaker>: <text>`.
    pub verbose: bool,
    /// Name of the agent who speaks first; the first agent when unset.
    pub first_speaker: Option<String>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            max_turns: DEFAULT_MAX_TURNS,
            turn_delay: Duration::ZERO,
            verbose: true,
            first_speaker: None,
        }
    }
}

impl RunSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_turns == 0 {
            return Err(ConfigError::InvalidMaxTurns);
        }
        Ok(())
    }

    /// Converts a delay given in (possibly fractional) seconds.
    pub fn delay_from_secs(secs: f64) -> Result<Duration, ConfigError> {
        if secs < 0.0 {
            return Err(ConfigError::InvalidDelay(secs));
        }
        Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::InvalidDelay(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_from_secs_rejects_negative_nan_and_overflow() {
        assert_eq!(
            RunSettings::delay_from_secs(0.25),
            Ok(Duration::from_millis(250))
        );
        assert_eq!(
            RunSettings::delay_from_secs(-1.0),
            Err(ConfigError::InvalidDelay(-1.0))
        );
        assert!(RunSettings::delay_from_secs(f64::NAN).is_err());
        assert!(RunSettings::delay_from_secs(f64::INFINITY).is_err());
        assert_eq!(
            RunSettings::delay_from_secs(1e30),
            Err(ConfigError::InvalidDelay(1e30))
        );
    }

    #[test]
    fn zero_turn_budget_is_rejected() {
        let settings = RunSettings {
            max_turns: 0,
            ..Default::default()
        };
        assert_eq!(settings.validate(), Err(ConfigError::InvalidMaxTurns));
    }
}
