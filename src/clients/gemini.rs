/*!
 * Gemini client for the Google generative language API.
 */

use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::clients::{ClientRequest, TranslationClient};
use crate::errors::ClientError;
use crate::lang::Language;
use crate::translation::prompts;

/// Gemini client for interacting with the generative language API
#[derive(Debug)]
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
    /// Model name
    model: String,
    /// Number of retries on transient failure
    retry_count: u32,
    /// Base backoff time, doubled on each retry
    retry_backoff_ms: u64,
}

/// Gemini generate-content request
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    /// The conversation contents
    contents: Vec<GeminiContent>,
}

/// A content block in a request or response
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    /// The parts of the content
    parts: Vec<GeminiPart>,
}

/// A single text part
#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    /// The text content
    text: String,
}

/// Gemini generate-content response
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    /// Response candidates; the first one is used
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

/// One response candidate
#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    /// The candidate content
    content: GeminiContent,
}

impl Gemini {
    /// Create a new Gemini client
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new_with_config(api_key, endpoint, model, 3, 1000, 30)
    }

    /// Create a new Gemini client with retry and timeout configuration
    pub fn new_with_config(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        retry_count: u32,
        retry_backoff_ms: u64,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
            retry_count,
            retry_backoff_ms,
        }
    }

    /// Resolve the generate-content URL for the configured model
    fn api_url(&self) -> String {
        let base = if self.endpoint.is_empty() {
            "https://generativelanguage.googleapis.com"
        } else {
            self.endpoint.trim_end_matches('/')
        };
        format!("{}/v1beta/models/{}:generateContent", base, self.model)
    }

    /// Send one generate-content request, without retry
    async fn generate(&self, prompt: &str) -> Result<String, ClientError> {
        let request = GenerateContentRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.api_url())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    ClientError::ConnectionError(e.to_string())
                } else {
                    ClientError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Gemini API error ({}): {}", status, message);
            return Err(ClientError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| ClientError::ParseError(e.to_string()))?;

        let text: String = body
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ClientError::EmptyResponse);
        }

        Ok(text)
    }

    /// True if a failed request is worth retrying
    fn is_transient(error: &ClientError) -> bool {
        match error {
            ClientError::ConnectionError(_) | ClientError::RequestFailed(_) => true,
            ClientError::ApiError { status_code, .. } => *status_code >= 500 || *status_code == 429,
            _ => false,
        }
    }
}

#[async_trait]
impl TranslationClient for Gemini {
    async fn translate(&self, request: ClientRequest) -> Result<String, ClientError> {
        let prompt = prompts::build_prompt(&request);

        let mut backoff_ms = self.retry_backoff_ms;
        let mut attempt = 0;
        loop {
            match self.generate(&prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if attempt < self.retry_count && Self::is_transient(&e) => {
                    attempt += 1;
                    warn!(
                        "Gemini request failed (attempt {}/{}), retrying in {}ms: {}",
                        attempt, self.retry_count, backoff_ms, e
                    );
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms = backoff_ms.saturating_mul(2);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn test_connection(&self) -> Result<(), ClientError> {
        let request = ClientRequest::single("Hello.", Language::English, Language::French);
        let text = self.translate(request).await?;
        debug!("Gemini connection test response: {}", text.trim());
        Ok(())
    }
}
