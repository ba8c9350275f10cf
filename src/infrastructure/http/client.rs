use std::time::Duration;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Query string pairs
pub type Query<'a> = &'a [(&'a str, String)];

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn get_text(
        &self,
        url: &str,
        query: Query<'_>,
        headers: Vec<(&str, &str)>,
    ) -> Result<String, DomainError>;

    async fn get_json(
        &self,
        url: &str,
        query: Query<'_>,
        headers: Vec<(&str, &str)>,
    ) -> Result<serde_json::Value, DomainError>;

    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    /// Client with an overall request timeout and a default `User-Agent`
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, DomainError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                DomainError::provider("http", format!("Request timed out: {}", e))
            } else {
                DomainError::provider("http", format!("Request failed: {}", e))
            }
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::provider(
                "http",
                format!("HTTP {}: {}", status, truncate(&error_body, 200)),
            ));
        }

        Ok(response)
    }
}

fn truncate(body: &str, max: usize) -> &str {
    match body.char_indices().nth(max) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

fn with_headers<'a>(
    mut request: reqwest::RequestBuilder,
    headers: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> reqwest::RequestBuilder {
    for (key, value) in headers {
        request = request.header(key, value);
    }
    request
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn get_text(
        &self,
        url: &str,
        query: Query<'_>,
        headers: Vec<(&str, &str)>,
    ) -> Result<String, DomainError> {
        let request = with_headers(self.client.get(url).query(query), headers);
        let response = self.send(request).await?;

        response
            .text()
            .await
            .map_err(|e| DomainError::provider("http", format!("Failed to read body: {}", e)))
    }

    async fn get_json(
        &self,
        url: &str,
        query: Query<'_>,
        headers: Vec<(&str, &str)>,
    ) -> Result<serde_json::Value, DomainError> {
        let request = with_headers(self.client.get(url).query(query), headers);
        let response = self.send(request).await?;

        response
            .json()
            .await
            .map_err(|e| DomainError::parse("http", format!("Failed to parse response: {}", e)))
    }

    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        let request = with_headers(self.client.post(url).json(body), headers);
        let response = self.send(request).await?;

        response
            .json()
            .await
            .map_err(|e| DomainError::parse("http", format!("Failed to parse response: {}", e)))
    }
}
