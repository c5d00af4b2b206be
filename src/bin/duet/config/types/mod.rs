mod agent;
mod app;
mod logging;
mod run;

const DEFAULT_MODEL: &str = "small-model";
const DEFAULT_TEMPERATURE: f32 = 0.8;
const DEFAULT_MAX_TOKENS: u32 = 300;
const DEFAULT_MAX_MESSAGES: usize = 50;
const DEFAULT_TRANSCRIPT_PATH: &str = "tinder_conversation.md";
const DEFAULT_TITLE: &str = "Do Match ao Cappuccino: Um Diálogo";
const DEFAULT_SUBTITLE: &str = "pt-PT";
const DEFAULT_LOG_ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const DEFAULT_LOG_ROTATE_KEEP: usize = 5;

pub use agent::AgentConfig;
pub use app::AppConfig;
pub use logging::LoggingConfig;
pub use run::{RunConfig, TranscriptConfig};
