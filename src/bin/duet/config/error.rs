use std::io;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("config IO error: {0}")]
    Io(#[from] io::Error),
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid value {value:?} for {name}")]
    InvalidEnv { name: String, value: String },
    #[error("missing home directory for config paths")]
    MissingHome,
}
