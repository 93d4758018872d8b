//! Chat-completion transport.
//!
//! [`LlmClient`] is the seam between prompt logic and the network.
//! [`HttpLlmClient`] speaks the OpenAI-compatible chat completions API;
//! [`UnconfiguredClient`] stands in when no API key is set so callers can
//! keep one code path.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pacer_config::OracleConfig;
use serde::{Deserialize, Serialize};

use crate::error::OracleError;
use crate::http::check_response;

/// One system + user exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmRequest {
    pub system: String,
    pub user: String,
    pub model: String,
    pub temperature: f32,
}

/// Sends a prompt pair and returns the assistant's raw text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: LlmRequest) -> Result<String, OracleError>;
}

#[async_trait]
impl<T: LlmClient + ?Sized> LlmClient for Arc<T> {
    async fn complete(&self, request: LlmRequest) -> Result<String, OracleError> {
        (**self).complete(request).await
    }
}

#[async_trait]
impl<T: LlmClient + ?Sized> LlmClient for Box<T> {
    async fn complete(&self, request: LlmRequest) -> Result<String, OracleError> {
        (**self).complete(request).await
    }
}

// ── HTTP ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

/// OpenAI-compatible chat completions client.
pub struct HttpLlmClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpLlmClient {
    /// Build a client from the `[oracle]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Unavailable`] when the API key or endpoint is
    /// empty, and [`OracleError::Http`] if the underlying client fails to build.
    pub fn from_config(config: &OracleConfig) -> Result<Self, OracleError> {
        if !config.is_configured() {
            return Err(OracleError::Unavailable(
                "oracle.api_key is not set".to_string(),
            ));
        }
        let http = reqwest::Client::builder()
            .user_agent(concat!("pacer/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl LlmClient for HttpLlmClient {
    async fn complete(&self, request: LlmRequest) -> Result<String, OracleError> {
        let body = ChatRequest {
            model: &request.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
        };

        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let text = check_response(resp).await?.text().await?;
        content_from_reply(&text)
    }
}

fn content_from_reply(text: &str) -> Result<String, OracleError> {
    let parsed: ChatResponse = serde_json::from_str(text)
        .map_err(|e| OracleError::Parse(format!("invalid chat completion body: {e}")))?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| OracleError::Parse("chat completion had no content".to_string()))
}

// ── Stand-ins ──────────────────────────────────────────────────────

/// Always fails with [`OracleError::Unavailable`].
pub struct UnconfiguredClient {
    reason: String,
}

impl UnconfiguredClient {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl LlmClient for UnconfiguredClient {
    async fn complete(&self, _request: LlmRequest) -> Result<String, OracleError> {
        Err(OracleError::Unavailable(self.reason.clone()))
    }
}

/// Replies with a fixed text (or a fixed API failure) and records every
/// request it sees.
pub struct MockLlmClient {
    reply: Result<String, u16>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmClient {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fail every call with `OracleError::Api { status }`.
    pub const fn failing(status: u16) -> Self {
        Self {
            reply: Err(status),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: LlmRequest) -> Result<String, OracleError> {
        if let Ok(mut seen) = self.requests.lock() {
            seen.push(request);
        }
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(OracleError::Api {
                status: *status,
                message: "mock failure".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn from_config_requires_api_key() {
        let result = HttpLlmClient::from_config(&OracleConfig::default());
        assert!(matches!(result, Err(OracleError::Unavailable(_))));
    }

    #[test]
    fn from_config_builds_with_key() {
        let config = OracleConfig {
            api_key: "sk-test".into(),
            ..OracleConfig::default()
        };
        assert!(HttpLlmClient::from_config(&config).is_ok());
    }

    #[test]
    fn chat_request_shape() {
        let body = ChatRequest {
            model: "gpt-4o-mini",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "rules",
                },
                ChatMessage {
                    role: "user",
                    content: "tasks",
                },
            ],
            temperature: 0.5,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "rules"},
                    {"role": "user", "content": "tasks"}
                ],
                "temperature": 0.5
            })
        );
    }

    #[test]
    fn extracts_first_choice_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#;
        assert_eq!(content_from_reply(body).unwrap(), "hello");
    }

    #[test]
    fn empty_choices_is_parse_error() {
        assert!(matches!(
            content_from_reply(r#"{"choices":[]}"#),
            Err(OracleError::Parse(_))
        ));
        assert!(matches!(
            content_from_reply("<html>"),
            Err(OracleError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn unconfigured_client_is_unavailable() {
        let client: Arc<dyn LlmClient> = Arc::new(UnconfiguredClient::new("no key"));
        let request = LlmRequest {
            system: String::new(),
            user: String::new(),
            model: "m".into(),
            temperature: 0.0,
        };
        assert!(matches!(
            client.complete(request).await,
            Err(OracleError::Unavailable(ref r)) if r == "no key"
        ));
    }
}
