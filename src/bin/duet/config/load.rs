use std::fs;
use std::path::{Path, PathBuf};

use super::error::LoadError;
use super::paths::ConfigPaths;
use super::types::AppConfig;

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub paths: ConfigPaths,
    pub config_exists: bool,
}

/// Reads the TOML config, falling back to built-in defaults when the file
/// does not exist.
pub fn load_config(path_override: Option<PathBuf>) -> Result<LoadedConfig, LoadError> {
    let paths = ConfigPaths::resolve(path_override)?;
    let read = read_config(&paths.config_file)?;
    Ok(LoadedConfig {
        config: read.config,
        paths,
        config_exists: read.exists,
    })
}

fn read_config(path: &Path) -> Result<ConfigRead, LoadError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(ConfigRead {
            config: toml::from_str(&contents)?,
            exists: true,
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(ConfigRead {
            config: AppConfig::default(),
            exists: false,
        }),
        Err(err) => Err(LoadError::Io(err)),
    }
}

struct ConfigRead {
    config: AppConfig,
    exists: bool,
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().expect("tempdir");
        let loaded = load_config(Some(dir.path().join("absent.toml"))).expect("load");
        assert!(!loaded.config_exists);
        assert_eq!(loaded.config.agents.len(), 2);
    }

    #[test]
    fn reads_agents_and_run_sections() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[run]
max_messages = 12
turn_delay_s = 1.5

[transcript]
path = "out.md"

[[agents]]
name = "Ana"
model = "gemini-2.0-flash"
base_url = "https://generativelanguage.googleapis.com/v1beta/openai/"
api_key_env = "GOOGLE_API_KEY"

[[agents]]
name = "Rui"
model = "llama-3.3-70b-versatile"
api_key_env = "GROQ_API_KEY"
temperature = 1.1
"#,
        )
        .expect("write config");

        let loaded = load_config(Some(path)).expect("load");
        let config = loaded.config;
        assert!(loaded.config_exists);
        assert_eq!(config.run.max_messages, 12);
        assert_eq!(config.run.turn_delay_s, 1.5);
        assert!(config.run.verbose);
        assert_eq!(config.transcript.path, "out.md");
        assert_eq!(config.agents.len(), 2);
        assert_eq!(config.agents[1].temperature, 1.1);
        assert_eq!(config.agents[0].max_tokens, 300);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[run\nmax_messages = ").expect("write config");
        assert!(matches!(load_config(Some(path)), Err(LoadError::Toml(_))));
    }
}
