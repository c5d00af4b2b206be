//! Client for any endpoint speaking the OpenAI `/chat/completions` dialect.
//!
//! OpenAI itself, Groq, DeepSeek, Gemini's OpenAI-compatible surface and most
//! local inference servers accept the same request shape, so a single client
//! parameterised by base URL covers all of them.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    chat::{ChatMessage, ChatProvider, ChatResponse, Usage},
    error::LLMError,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";

/// Configuration for the OpenAI-compatible client.
#[derive(Debug)]
pub struct OpenAICompatibleConfig {
    /// API key for bearer authentication.
    pub api_key: SecretString,
    /// Endpoint root, always ending with `/`.
    pub base_url: Url,
    /// Model identifier.
    pub model: String,
    /// Maximum tokens to generate in responses.
    pub max_tokens: Option<u32>,
    /// Sampling temperature for response randomness.
    pub temperature: Option<f32>,
    /// Request timeout in seconds.
    pub timeout_seconds: Option<u64>,
}

/// Client for an OpenAI-compatible chat endpoint.
///
/// The client uses `Arc` internally for configuration, making cloning cheap.
#[derive(Debug, Clone)]
pub struct OpenAICompatible {
    /// Shared configuration wrapped in Arc for cheap cloning.
    pub config: Arc<OpenAICompatibleConfig>,
    /// HTTP client for making requests.
    pub client: Client,
}

#[derive(Serialize)]
struct OpenAIChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatResponse {
    choices: Vec<OpenAIChatChoice>,
    usage: Option<Usage>,
}

impl std::fmt::Display for OpenAIChatResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.text() {
            Some(text) => write!(f, "{text}"),
            None => write!(f, "No response content"),
        }
    }
}

#[derive(Deserialize, Debug)]
struct OpenAIChatChoice {
    message: OpenAIChatMsg,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatMsg {
    content: Option<String>,
}

impl ChatResponse for OpenAIChatResponse {
    fn text(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|c| c.message.content.clone())
            .filter(|content| !content.is_empty())
    }

    fn usage(&self) -> Option<Usage> {
        self.usage.clone()
    }
}

impl OpenAICompatible {
    /// Creates a client, failing when the base URL is unusable or the HTTP
    /// client cannot be built.
    pub fn new(
        api_key: SecretString,
        base_url: Option<&str>,
        model: impl Into<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, LLMError> {
        let mut builder = Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(sec));
        }
        let client = builder.build()?;
        Self::with_client(
            client,
            api_key,
            base_url,
            model,
            max_tokens,
            temperature,
            timeout_seconds,
        )
    }

    /// Creates a client around a caller-supplied HTTP client.
    pub fn with_client(
        client: Client,
        api_key: SecretString,
        base_url: Option<&str>,
        model: impl Into<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, LLMError> {
        if api_key.expose_secret().is_empty() {
            return Err(LLMError::AuthError("Missing API key".to_string()));
        }
        let base_url = parse_base_url(base_url.unwrap_or(DEFAULT_BASE_URL))?;
        Ok(Self {
            config: Arc::new(OpenAICompatibleConfig {
                api_key,
                base_url,
                model: model.into(),
                max_tokens,
                temperature,
                timeout_seconds,
            }),
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    fn completions_url(&self) -> Result<Url, LLMError> {
        self.config
            .base_url
            .join("chat/completions")
            .map_err(|e| LLMError::InvalidRequest(format!("invalid endpoint: {e}")))
    }
}

/// Parses a base URL, appending a trailing slash so relative joins keep the
/// last path segment (`.../openai/v1` + `chat/completions`).
fn parse_base_url(raw: &str) -> Result<Url, LLMError> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&normalized)
        .map_err(|e| LLMError::InvalidRequest(format!("invalid base URL {raw:?}: {e}")))
}

#[async_trait]
impl ChatProvider for OpenAICompatible {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, LLMError> {
        let body = OpenAIChatRequest {
            model: &self.config.model,
            messages: messages
                .iter()
                .map(|m| OpenAIChatMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            stream: false,
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&body) {
                log::trace!("{} request payload: {}", self.config.model, json);
            }
        }

        let resp = self
            .client
            .post(self.completions_url()?)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        log::debug!("{} HTTP status: {}", self.config.model, status);

        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(LLMError::ProviderError(format!(
                "{status}: {}",
                error_text.trim()
            )));
        }

        let raw = resp.text().await?;
        let parsed: OpenAIChatResponse =
            serde_json::from_str(&raw).map_err(|e| LLMError::ResponseFormatError {
                message: e.to_string(),
                raw_response: raw.clone(),
            })?;
        Ok(Box::new(parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SecretString {
        SecretString::new("sk-test".to_string())
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = OpenAICompatible::new(
            key(),
            Some("https://api.groq.com/openai/v1"),
            "llama",
            None,
            None,
            None,
        )
        .expect("client");
        assert_eq!(
            client.completions_url().expect("url").as_str(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = OpenAICompatible::new(key(), Some("not a url"), "m", None, None, None)
            .expect_err("bad url must fail");
        assert!(matches!(err, LLMError::InvalidRequest(_)));
    }

    #[test]
    fn rejects_empty_api_key() {
        let err = OpenAICompatible::new(
            SecretString::new(String::new()),
            None,
            "m",
            None,
            None,
            None,
        )
        .expect_err("empty key must fail");
        assert!(matches!(err, LLMError::AuthError(_)));
    }

    #[tokio::test]
    async fn posts_chat_request_and_reads_first_choice() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "small-model",
                "max_tokens": 300,
                "messages": [
                    {"role": "system", "content": "persona"},
                    {"role": "user", "content": "Olá"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices":[{"message":{"role":"assistant","content":"Olá! Tudo bem?"}}],
                    "usage":{"prompt_tokens":5,"completion_tokens":4,"total_tokens":9}}"#,
            )
            .create_async()
            .await;

        let client = OpenAICompatible::new(
            key(),
            Some(&server.url()),
            "small-model",
            Some(300),
            Some(0.8),
            Some(5),
        )
        .expect("client");
        let messages = [
            ChatMessage::system().content("persona").build(),
            ChatMessage::user().content("Olá").build(),
        ];
        let resp = client.chat(&messages).await.expect("chat");

        assert_eq!(resp.text().as_deref(), Some("Olá! Tudo bem?"));
        assert_eq!(resp.usage().map(|u| u.total_tokens), Some(9));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_provider_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body("quota exceeded")
            .create_async()
            .await;

        let client =
            OpenAICompatible::new(key(), Some(&server.url()), "m", None, None, Some(5))
                .expect("client");
        let messages = [ChatMessage::user().content("hi").build()];
        let err = client.chat(&messages).await.expect_err("429 must fail");
        match err {
            LLMError::ProviderError(msg) => assert!(msg.contains("quota exceeded")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_response_format_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body("{\"unexpected\": true}")
            .create_async()
            .await;

        let client =
            OpenAICompatible::new(key(), Some(&server.url()), "m", None, None, Some(5))
                .expect("client");
        let messages = [ChatMessage::user().content("hi").build()];
        let err = client.chat(&messages).await.expect_err("bad body must fail");
        assert!(matches!(err, LLMError::ResponseFormatError { .. }));
    }
}
