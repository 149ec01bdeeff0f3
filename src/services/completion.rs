use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};

/// Completion budget per request
const MAX_TOKENS: u32 = 1000;

/// Trait for generative completion backends
///
/// One prompt in, raw completion text out. A single attempt per call: a
/// failed call surfaces as a backend error for the caller to report, never
/// a silent partial success.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send one prompt as a single user turn and return the response text
    async fn complete(&self, prompt: &str) -> AppResult<String>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Chat-style completion backend (the canonical protocol binding)
#[derive(Clone)]
pub struct ChatCompletionsBackend {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl ChatCompletionsBackend {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
        }
    }
}

#[async_trait]
impl CompletionBackend for ChatCompletionsBackend {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let url = format!("{}/v1/chat/completions", self.api_url);
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": MAX_TOKENS,
        });

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Backend {
                status: Some(status.as_u16()),
                message: format!("completion API returned status {}: {}", status, body),
            });
        }

        let completion: ChatResponse = response.json().await.map_err(transport_error)?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(no_choices)?;

        tracing::debug!(
            backend = self.name(),
            chars = content.len(),
            "Completion received"
        );

        Ok(content)
    }

    fn name(&self) -> &'static str {
        "chat_completions"
    }
}

/// Single-completion backend (the historical protocol binding)
///
/// Earlier revisions of the service spoke the plain completions endpoint
/// with a raw prompt field. Kept behind the same trait so either binding
/// slots into the pipeline.
#[derive(Clone)]
pub struct LegacyCompletionsBackend {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl LegacyCompletionsBackend {
    pub fn new(api_key: String, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            model,
        }
    }
}

#[async_trait]
impl CompletionBackend for LegacyCompletionsBackend {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let url = format!("{}/v1/completions", self.api_url);
        let body = json!({
            "model": self.model,
            "prompt": prompt,
            "max_tokens": MAX_TOKENS,
        });

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Backend {
                status: Some(status.as_u16()),
                message: format!("completion API returned status {}: {}", status, body),
            });
        }

        let completion: CompletionResponse = response.json().await.map_err(transport_error)?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.text)
            .ok_or_else(no_choices)
    }

    fn name(&self) -> &'static str {
        "completions"
    }
}

fn transport_error(err: reqwest::Error) -> AppError {
    AppError::Backend {
        status: err.status().map(|s| s.as_u16()),
        message: err.to_string(),
    }
}

fn no_choices() -> AppError {
    AppError::Backend {
        status: None,
        message: "completion response carried no choices".to_string(),
    }
}

/// Chat completions response body
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Legacy completions response body
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_response_deserialization() {
        let json = r#"{
            "id": "chatcmpl-123",
            "choices": [
                {
                    "index": 0,
                    "message": { "role": "assistant", "content": "[{\"movie\":\"Memento\"}]" },
                    "finish_reason": "stop"
                }
            ]
        }"#;

        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices.len(), 1);
        assert_eq!(
            response.choices[0].message.content,
            "[{\"movie\":\"Memento\"}]"
        );
    }

    #[test]
    fn test_completion_response_deserialization() {
        let json = r#"{
            "id": "cmpl-123",
            "choices": [
                { "index": 0, "text": "Here you go: []", "finish_reason": "stop" }
            ]
        }"#;

        let response: CompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices[0].text, "Here you go: []");
    }

    #[test]
    fn test_no_choices_is_backend_error_without_status() {
        match no_choices() {
            AppError::Backend { status, message } => {
                assert_eq!(status, None);
                assert!(message.contains("no choices"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
