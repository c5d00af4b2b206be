use std::path::PathBuf;

use super::error::LoadError;

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_file: PathBuf,
    pub logs_dir: PathBuf,
}

impl ConfigPaths {
    pub fn resolve(config_override: Option<PathBuf>) -> Result<Self, LoadError> {
        let config_file = match config_override {
            Some(path) => path,
            None => default_config_dir()?.join("config.toml"),
        };
        Ok(Self {
            config_file,
            logs_dir: default_logs_dir()?,
        })
    }
}

fn default_config_dir() -> Result<PathBuf, LoadError> {
    let home = dirs::home_dir().ok_or(LoadError::MissingHome)?;
    Ok(home.join(".config").join("duet"))
}

fn default_logs_dir() -> Result<PathBuf, LoadError> {
    let home = dirs::home_dir().ok_or(LoadError::MissingHome)?;
    Ok(home.join(".local").join("share").join("duet").join("logs"))
}
