/*!
 * Ollama client for a local LLM server.
 */

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::clients::{ClientRequest, TranslationClient};
use crate::errors::ClientError;
use crate::translation::prompts;

/// Ollama client for interacting with the Ollama API
#[derive(Debug)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    /// Model name to use for generation
    model: String,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize)]
struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// Whether to stream the response
    stream: bool,
}

/// Generation response from the Ollama API
#[derive(Debug, Deserialize)]
struct GenerationResponse {
    /// Generated text
    response: String,
}

/// Version response from the Ollama API
#[derive(Debug, Deserialize)]
struct VersionResponse {
    /// Server version string
    version: String,
}

impl Ollama {
    /// Create a new Ollama client
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, timeout_secs: u64) -> Self {
        let endpoint = endpoint.into();
        let base_url = if endpoint.is_empty() {
            "http://localhost:11434".to_string()
        } else {
            endpoint.trim_end_matches('/').to_string()
        };

        Self {
            base_url,
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            model: model.into(),
        }
    }

    /// Send one generate request
    async fn generate(&self, prompt: &str) -> Result<String, ClientError> {
        let request = GenerationRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
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
            error!("Ollama API error ({}): {}", status, message);
            return Err(ClientError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body = response
            .json::<GenerationResponse>()
            .await
            .map_err(|e| ClientError::ParseError(e.to_string()))?;

        if body.response.trim().is_empty() {
            return Err(ClientError::EmptyResponse);
        }

        Ok(body.response)
    }
}

#[async_trait]
impl TranslationClient for Ollama {
    async fn translate(&self, request: ClientRequest) -> Result<String, ClientError> {
        let prompt = prompts::build_prompt(&request);
        self.generate(&prompt).await
    }

    async fn test_connection(&self) -> Result<(), ClientError> {
        let response = self
            .client
            .get(format!("{}/api/version", self.base_url))
            .send()
            .await
            .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

        let version = response
            .json::<VersionResponse>()
            .await
            .map_err(|e| ClientError::ParseError(e.to_string()))?;

        debug!("Connected to Ollama version {}", version.version);
        Ok(())
    }
}
