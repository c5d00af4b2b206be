use serde::{Deserialize, Serialize};

use duet::{AgentProfile, ConfigError, RunSettings};

use crate::args::CliArgs;

use super::{AgentConfig, LoggingConfig, RunConfig, TranscriptConfig};

/// Kickoff for the first built-in agent. Kept free of scheduling words so an
/// offline run is not ended by its own opening.
const DEFAULT_OPENING_A: &str = "Abre a conversa com uma mensagem curta neste espírito: \
\"Olá! Curti o teu perfil. Que tal começarmos por um cappuccino com bolo decente? 🙂\"";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub run: RunConfig,
    pub transcript: TranscriptConfig,
    pub logging: LoggingConfig,
    pub agents: Vec<AgentConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            run: RunConfig::default(),
            transcript: TranscriptConfig::default(),
            logging: LoggingConfig::default(),
            agents: vec![
                AgentConfig {
                    opening: Some(DEFAULT_OPENING_A.to_string()),
                    ..AgentConfig::persona(
                        "Homem (40)",
                        "Portuguese man, 40, friendly, playful, short messages, pt-PT.",
                    )
                },
                AgentConfig::persona(
                    "Mulher (35)",
                    "Portuguese woman, 35, witty, curious, short messages, pt-PT.",
                ),
            ],
        }
    }
}

impl AppConfig {
    /// Command-line flags take precedence over file and environment.
    pub fn apply_args(&mut self, args: &CliArgs) {
        if let Some(max) = args.max_messages {
            self.run.max_messages = max;
        }
        if let Some(delay) = args.delay {
            self.run.turn_delay_s = delay;
        }
        if let Some(out) = &args.out {
            self.transcript.path = out.to_string_lossy().into_owned();
        }
        if let Some(title) = &args.title {
            self.transcript.title = title.clone();
        }
        if let Some(subtitle) = &args.subtitle {
            self.transcript.subtitle = Some(subtitle.clone());
        }
        if let Some(first) = &args.first_speaker {
            self.run.first_speaker = Some(first.clone());
        }
        if args.quiet {
            self.run.verbose = false;
        }
        if let Some(level) = &args.log_level {
            self.logging.level = level.clone();
        }
    }

    pub fn run_settings(&self) -> Result<RunSettings, ConfigError> {
        let settings = RunSettings {
            max_turns: self.run.max_messages,
            turn_delay: RunSettings::delay_from_secs(self.run.turn_delay_s)?,
            verbose: self.run.verbose,
            first_speaker: self
                .run
                .first_speaker
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn agent_profiles(&self) -> Vec<AgentProfile> {
        self.agents.iter().map(AgentConfig::to_profile).collect()
    }
}
