//! OpenAI-compatible chat completion client (`/chat/completions`).
//!
//! One round-trip per call, `temperature: 0`. Wire types stay private.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("OPENAI_API_KEY not found or empty")]
    MissingKey,
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("LLM returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("LLM returned no content")]
    EmptyResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Cheap to clone: `reqwest::Client` is an `Arc` internally
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
        })
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send the messages and return the trimmed text of the first choice
    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingKey)?;

        let payload = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: 0.0,
        };

        tracing::debug!(model = %self.model, messages = messages.len(), "→ LLM request");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), "✗ LLM request failed");
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(LlmError::EmptyResponse)?;

        tracing::debug!(content_len = content.len(), "✓ LLM response");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trip_protocol::testing::spawn_mock;
    use axum::{http::HeaderMap, routing::post, Json, Router};
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_chat_returns_trimmed_content() {
        let app = Router::new().route(
            "/chat/completions",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers["authorization"], "Bearer sk-test-key-123");
                assert_eq!(body["temperature"], 0.0);
                assert_eq!(body["messages"][0]["role"], "system");
                Json(json!({"choices": [{"message": {"role": "assistant", "content": "  rome food guide \n"}}]}))
            }),
        );
        let base = spawn_mock(app).await;

        let client = OpenAiClient::new(base, "gpt-test", Some("sk-test-key-123".into()), 5).unwrap();
        let out = client
            .chat(&[ChatMessage::system("sys"), ChatMessage::user("hi")])
            .await
            .unwrap();
        assert_eq!(out, "rome food guide");
    }

    #[tokio::test]
    async fn test_chat_errors() {
        let client = OpenAiClient::new("http://127.0.0.1:9", "m", None, 5).unwrap();
        assert!(matches!(client.chat(&[ChatMessage::user("x")]).await, Err(LlmError::MissingKey)));

        let app = Router::new()
            .route(
                "/chat/completions",
                post(|| async { (axum::http::StatusCode::UNAUTHORIZED, "bad key") }),
            );
        let base = spawn_mock(app).await;
        let client = OpenAiClient::new(base, "m", Some("sk-bad-key-0000".into()), 5).unwrap();
        match client.chat(&[ChatMessage::user("x")]).await {
            Err(LlmError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "bad key");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_chat_empty_choices() {
        let app = Router::new().route("/chat/completions", post(|| async { Json(json!({"choices": []})) }));
        let base = spawn_mock(app).await;
        let client = OpenAiClient::new(base, "m", Some("sk-test-key-123".into()), 5).unwrap();
        assert!(matches!(
            client.chat(&[ChatMessage::user("x")]).await,
            Err(LlmError::EmptyResponse)
        ));
    }
}
