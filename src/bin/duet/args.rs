use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    name = "duet",
    about = "Run a scripted dialogue between LLM agents until they agree to meet"
)]
pub struct CliArgs {
    /// TOML config file (default: ~/.config/duet/config.toml)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
    /// Maximum number of turns across all agents
    #[arg(long, short = 'n')]
    pub max_messages: Option<usize>,
    /// Pause between turns, in seconds
    #[arg(long)]
    pub delay: Option<f64>,
    /// Transcript output path
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub subtitle: Option<String>,
    /// Name of the agent who opens the conversation
    #[arg(long)]
    pub first_speaker: Option<String>,
    /// Do not echo turns to stdout
    #[arg(long, short = 'q')]
    pub quiet: bool,
    #[arg(long)]
    pub log_level: Option<String>,
}
