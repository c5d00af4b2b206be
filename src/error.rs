use thiserror::Error;

/// Error types that can occur when talking to a text-generation provider.
///
/// These never escape a [`ProviderAdapter`](crate::ProviderAdapter); they are
/// turned into fallback replies there.
#[derive(Debug, Error)]
pub enum LLMError {
    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Authentication and authorization errors
    #[error("Auth error: {0}")]
    AuthError(String),
    /// Invalid request parameters or format
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// Errors returned by the LLM provider
    #[error("Provider error: {0}")]
    ProviderError(String),
    /// API response parsing or format error
    #[error("Response format error: {message}. Raw response: {raw_response}")]
    ResponseFormatError {
        message: String,
        raw_response: String,
    },
}

/// Converts reqwest HTTP errors into LLMErrors
impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        LLMError::HttpError(err.to_string())
    }
}

/// Malformed dialogue setup, rejected before any turn is produced.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("duplicate agent name: {0}")]
    DuplicateAgent(String),
    #[error("agent name must not be empty")]
    EmptyAgentName,
    #[error("a dialogue needs at least 2 agents, got {0}")]
    TooFewAgents(usize),
    #[error("first speaker {0:?} is not one of the configured agents")]
    UnknownSpeaker(String),
    #[error("agent {agent}: temperature {value} is outside [0, 2]")]
    InvalidTemperature { agent: String, value: f32 },
    #[error("agent {0}: max_tokens must be positive")]
    InvalidMaxTokens(String),
    #[error("agent {0}: model identifier must not be empty")]
    EmptyModel(String),
    #[error("maximum turn count must be positive")]
    InvalidMaxTurns,
    #[error("turn delay must be a finite, non-negative number of seconds, got {0}")]
    InvalidDelay(f64),
}
