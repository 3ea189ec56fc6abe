//! Local fine-tuned model provider.
//!
//! The causal language model is served by a llama.cpp-compatible inference
//! server next to this service. The provider is only handed to the
//! dispatcher once the server has reported the model as loaded.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Local model configuration.
#[derive(Debug, Clone)]
pub struct LocalModelConfig {
    pub endpoint: String,
    pub max_new_tokens: u32,
    pub timeout: Duration,
}

pub struct LocalModelProvider {
    config: LocalModelConfig,
    client: Client,
}

impl LocalModelProvider {
    /// Connect to the inference server and wait for a successful health check.
    pub async fn load(config: LocalModelConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        let provider = Self { config, client };
        provider.health_check().await?;

        tracing::info!(
            endpoint = %provider.config.endpoint,
            max_new_tokens = provider.config.max_new_tokens,
            "Local model loaded"
        );

        Ok(provider)
    }

    /// `GET /health`; the server answers 503 while the model loads.
    async fn health_check(&self) -> Result<(), ProviderError> {
        let response = self
            .client
            .get(self.url("health"))
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(format!(
                "Local model not ready: {}",
                response.status()
            )))
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.endpoint.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl TextProvider for LocalModelProvider {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        let n_predict = params
            .max_tokens
            .unwrap_or(self.config.max_new_tokens as i32);

        let request = CompletionRequest {
            prompt,
            n_predict,
            temperature: params.temperature.unwrap_or(0.7),
            stop: &params.stop_sequences,
        };

        tracing::debug!(
            prompt_len = prompt.len(),
            n_predict,
            "Sending completion request to local model"
        );

        let response = self
            .client
            .post(self.url("completion"))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(format!(
                "Local model error {}: {}",
                status, error_text
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        let finish_reason = if completion.stopped_limit {
            FinishReason::Length
        } else {
            FinishReason::Complete
        };

        Ok(ProviderResponse {
            text: Some(completion.content).filter(|t| !t.is_empty()),
            input_tokens: completion.tokens_evaluated,
            output_tokens: completion.tokens_predicted,
            finish_reason,
        })
    }

}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    n_predict: i32,
    temperature: f32,
    #[serde(skip_serializing_if = "no_stop_sequences")]
    stop: &'a [String],
}

fn no_stop_sequences(stop: &&[String]) -> bool {
    stop.is_empty()
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    content: String,
    #[serde(default)]
    tokens_evaluated: i32,
    #[serde(default)]
    tokens_predicted: i32,
    #[serde(default)]
    stopped_limit: bool,
}
