use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{DomainError, TextCompletion};
use crate::infrastructure::http::HttpClientTrait;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const MAX_TOKENS: u32 = 400;

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
    content: Option<String>,
}

/// OpenAI-compatible chat completions backend
#[derive(Debug)]
pub struct OpenAiCompletion<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
    model: String,
}

impl<C: HttpClientTrait> OpenAiCompletion<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENAI_BASE_URL, DEFAULT_MODEL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let auth_header = format!("Bearer {}", api_key.into());
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header,
            base_url,
            model: model.into(),
        }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn build_request(&self, system: &str, message: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": message},
            ],
            "max_tokens": MAX_TOKENS,
            "temperature": 0.4,
        })
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }
}

fn parse_response(json: serde_json::Value) -> Result<String, DomainError> {
    let response: ChatResponse = serde_json::from_value(json)
        .map_err(|e| DomainError::parse("openai", format!("Failed to parse response: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| DomainError::provider("openai", "No content in response"))
}

#[async_trait]
impl<C: HttpClientTrait> TextCompletion for OpenAiCompletion<C> {
    async fn complete(&self, system: &str, message: &str) -> Result<String, DomainError> {
        let url = self.chat_completions_url();
        let body = self.build_request(system, message);

        let response = self.client.post_json(&url, self.headers(), &body).await?;

        parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
