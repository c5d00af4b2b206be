use serde::{Deserialize, Serialize};

/// Usage metadata for a chat response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Number of tokens in the prompt
    #[serde(alias = "input_tokens")]
    pub prompt_tokens: u32,
    /// Number of tokens in the completion
    #[serde(alias = "output_tokens")]
    pub completion_tokens: u32,
    /// Total number of tokens used
    pub total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_input_output_aliases() {
        let usage: Usage = serde_json::from_str(
            r#"{"input_tokens": 12, "output_tokens": 30, "total_tokens": 42}"#,
        )
        .expect("usage json");
        assert_eq!(usage.prompt_tokens, 12);
        assert_eq!(usage.completion_tokens, 30);
        assert_eq!(usage.total_tokens, 42);
    }
}
