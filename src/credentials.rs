use std::collections::HashMap;

use secrecy::SecretString;

/// Named API credentials handed explicitly to each
/// [`ProviderAdapter`](crate::ProviderAdapter).
///
/// Adapters never read the process environment themselves; the caller
/// resolves every credential selector once and passes the result in.
#[derive(Debug, Default)]
pub struct Credentials {
    /// Map of selector names to their secret values
    secrets: HashMap<String, SecretString>,
}

impl Credentials {
    /// Creates an empty credential set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves each selector through `lookup`, keeping only non-empty values.
    ///
    /// # Arguments
    ///
    /// * `names` - Selector names, typically environment variable names
    /// * `lookup` - Source of values, e.g. `|name| std::env::var(name).ok()`
    pub fn resolve<I, S, F>(names: I, lookup: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut creds = Self::new();
        for name in names {
            let name = name.as_ref();
            if let Some(value) = lookup(name) {
                creds.insert(name, value);
            }
        }
        creds
    }

    /// Stores a secret under `name`. Blank values are ignored so that an
    /// empty variable behaves like a missing one.
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            return;
        }
        self.secrets
            .insert(name.to_string(), SecretString::new(value));
    }

    /// Retrieves a secret without exposing it as a String
    pub fn get(&self, name: &str) -> Option<&SecretString> {
        self.secrets.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.secrets.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.secrets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.secrets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn resolve_keeps_only_present_non_blank_values() {
        let creds = Credentials::resolve(["GROQ_API_KEY", "EMPTY", "MISSING"], |name| match name {
            "GROQ_API_KEY" => Some("gsk-123".to_string()),
            "EMPTY" => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(creds.len(), 1);
        assert_eq!(
            creds.get("GROQ_API_KEY").map(|s| s.expose_secret().as_str()),
            Some("gsk-123")
        );
        assert!(!creds.contains("EMPTY"));
        assert!(!creds.contains("MISSING"));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let mut creds = Credentials::new();
        creds.insert("KEY", "super-secret");
        assert!(!format!("{creds:?}").contains("super-secret"));
    }
}
