//! Mock provider implementation for testing.

use super::{GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Mock text provider returning a canned reply and recording prompts.
pub struct MockTextProvider {
    enabled: bool,
    reply: String,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockTextProvider {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            reply: "[]".to_string(),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Enabled provider that answers every prompt with `reply`.
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            enabled: true,
            reply: reply.into(),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Prompts seen so far, in call order.
    pub fn seen_prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt log poisoned").clone()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ));
        }

        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(prompt.to_string());

        // Simulate some processing
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        Ok(ProviderResponse {
            text: Some(self.reply.clone()),
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.enabled {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock text provider not enabled".to_string(),
            ))
        }
    }
}
