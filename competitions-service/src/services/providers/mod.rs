//! AI provider abstractions and implementations.
//!
//! A trait-based seam over the hosted model so the handler can run against
//! either the real Workers AI backend or a mock.

pub mod mock;
pub mod workers_ai;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Result of a provider inference call.
pub struct ProviderResponse {
    /// Raw output text, absent when the model returned nothing.
    pub text: Option<String>,
}

/// Generation parameters for a single inference call.
#[derive(Debug, Clone, Default)]
pub struct GenerationParams {
    /// Temperature (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Maximum output tokens.
    pub max_tokens: Option<i32>,
}

/// Trait for single-turn text generation providers.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Run one inference call and return the raw output text.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
