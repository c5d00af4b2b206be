//! Environment overrides layered on top of the config file.
//!
//! Agent variables carry a letter suffix by position (`MODEL_A` for the
//! first agent, `MODEL_B` for the second, ...). Blank values are ignored.

use std::str::FromStr;

use super::error::LoadError;
use super::types::AppConfig;

fn agent_suffix(index: usize) -> Option<char> {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| char::from(b'A' + i))
}

fn parse<T: FromStr>(name: &str, value: &str) -> Result<T, LoadError> {
    value.trim().parse().map_err(|_| LoadError::InvalidEnv {
        name: name.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(name: &str, value: &str) -> Result<bool, LoadError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(LoadError::InvalidEnv {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}

impl AppConfig {
    /// Applies overrides read through `lookup`, typically
    /// `|name| std::env::var(name).ok()`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), LoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        for (index, agent) in self.agents.iter_mut().enumerate() {
            let Some(suffix) = agent_suffix(index) else {
                break;
            };
            if let Some(model) = get(&format!("MODEL_{suffix}")) {
                agent.model = model;
            }
            if let Some(url) = get(&format!("BASE_URL_{suffix}")) {
                agent.base_url = Some(url);
            }
            if let Some(selector) = get(&format!("API_KEY_ENV_{suffix}")) {
                agent.api_key_env = Some(selector);
            }
            let name = format!("TEMPERATURE_{suffix}");
            if let Some(value) = get(&name) {
                agent.temperature = parse(&name, &value)?;
            }
            let name = format!("MAX_TOKENS_{suffix}");
            if let Some(value) = get(&name) {
                agent.max_tokens = parse(&name, &value)?;
            }
        }

        if let Some(value) = get("MAX_MESSAGES") {
            self.run.max_messages = parse("MAX_MESSAGES", &value)?;
        }
        if let Some(value) = get("TURN_DELAY_S") {
            self.run.turn_delay_s = parse("TURN_DELAY_S", &value)?;
        }
        if let Some(value) = get("VERBOSE") {
            self.run.verbose = parse_bool("VERBOSE", &value)?;
        }
        if let Some(path) = get("OUT_MD") {
            self.transcript.path = path;
        }
        if let Some(title) = get("TRANSCRIPT_TITLE") {
            self.transcript.title = title;
        }
        if let Some(subtitle) = get("TRANSCRIPT_SUBTITLE") {
            self.transcript.subtitle = Some(subtitle);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn applies_per_agent_and_run_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env(lookup(&[
                ("MODEL_A", "gemini-2.0-flash"),
                ("API_KEY_ENV_A", "GOOGLE_API_KEY"),
                ("MODEL_B", "llama-3.3-70b-versatile"),
                ("BASE_URL_B", "https://api.groq.com/openai/v1"),
                ("TEMPERATURE_B", "1.2"),
                ("MAX_MESSAGES", "20"),
                ("VERBOSE", "no"),
                ("OUT_MD", "dialogo.md"),
            ]))
            .expect("apply env");

        assert_eq!(config.agents[0].model, "gemini-2.0-flash");
        assert_eq!(config.agents[0].api_key_env.as_deref(), Some("GOOGLE_API_KEY"));
        assert_eq!(
            config.agents[1].base_url.as_deref(),
            Some("https://api.groq.com/openai/v1")
        );
        assert_eq!(config.agents[1].temperature, 1.2);
        assert_eq!(config.run.max_messages, 20);
        assert!(!config.run.verbose);
        assert_eq!(config.transcript.path, "dialogo.md");
    }

    #[test]
    fn blank_values_are_ignored() {
        let mut config = AppConfig::default();
        config
            .apply_env(lookup(&[("MODEL_A", ""), ("BASE_URL_A", "  ")]))
            .expect("apply env");
        assert_eq!(config.agents[0].model, "small-model");
        assert_eq!(config.agents[0].base_url, None);
    }

    #[test]
    fn unparseable_numbers_are_reported() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env(lookup(&[("MAX_MESSAGES", "lots")]))
            .expect_err("invalid number");
        assert!(matches!(err, LoadError::InvalidEnv { name, .. } if name == "MAX_MESSAGES"));
    }

    #[test]
    fn suffixes_follow_agent_position() {
        assert_eq!(agent_suffix(0), Some('A'));
        assert_eq!(agent_suffix(2), Some('C'));
        assert_eq!(agent_suffix(26), None);
    }
}
