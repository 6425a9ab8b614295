//! Cloudflare Workers AI provider implementation.
//!
//! Runs chat-style inference against the Workers AI REST API.

use super::{GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Cloudflare API base URL.
const CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// Workers AI provider configuration.
#[derive(Debug, Clone)]
pub struct WorkersAiConfig {
    pub account_id: String,
    pub api_token: String,
    pub model: String,
}

/// Workers AI text provider.
pub struct WorkersAiTextProvider {
    config: WorkersAiConfig,
    client: Client,
}

impl WorkersAiTextProvider {
    pub fn new(config: WorkersAiConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Build the model run URL for the configured account and model.
    fn run_url(&self) -> String {
        format!(
            "{}/accounts/{}/ai/run/{}",
            CLOUDFLARE_API_BASE, self.config.account_id, self.config.model
        )
    }
}

#[async_trait]
impl TextProvider for WorkersAiTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        let request = RunRequest {
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: params.max_tokens,
            temperature: params.temperature,
        };

        let url = self.run_url();

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to Workers AI"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_token)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Workers AI error {}: {}",
                status, error_text
            )));
        }

        let api_response: RunResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        if !api_response.success {
            let messages: Vec<String> = api_response
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.code, e.message))
                .collect();
            return Err(ProviderError::ApiError(messages.join("; ")));
        }

        Ok(ProviderResponse {
            text: api_response.result.and_then(|r| r.response),
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.config.api_token.is_empty() {
            return Err(ProviderError::NotConfigured(
                "Workers AI token not configured".to_string(),
            ));
        }

        // List available models to verify the token and account id work
        let url = format!(
            "{}/accounts/{}/ai/models/search",
            CLOUDFLARE_API_BASE, self.config.account_id
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_token)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError(format!(
                "Health check failed: {}",
                response.status()
            )))
        }
    }
}

// ============================================================================
// Workers AI Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct RunRequest {
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct RunResponse {
    #[serde(default)]
    result: Option<RunResult>,
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
}

#[derive(Debug, Deserialize)]
struct RunResult {
    #[serde(default)]
    response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    code: i32,
    message: String,
}
