//! Generation dispatch.
//!
//! Each generator slot is either available or unavailable, decided once at
//! startup. A failing call never changes the slot state; it only turns that
//! single call into [`GenerationOutcome::Failed`].

use super::metrics::{record_provider_call, record_token_usage};
use super::providers::gemini::{GeminiConfig, GeminiTextProvider};
use super::providers::local::{LocalModelConfig, LocalModelProvider};
use super::providers::{FinishReason, GenerationParams, ProviderError, TextProvider};
use crate::config::MindtrackConfig;
use crate::models::PayloadError;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Why a request could not be answered with generated content.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Result of one generation attempt.
#[derive(Debug)]
pub enum GenerationOutcome {
    /// Upstream answered with non-empty text.
    Generated(String),
    /// No generator is configured for the slot; nothing was called.
    Unavailable,
    /// The payload was unusable or the upstream call failed.
    Failed(GenerationError),
}

/// Generator slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Gemini.
    Primary,
    /// Locally served fine-tuned model.
    Custom,
}

#[derive(Clone)]
enum Upstream {
    Available(Arc<dyn TextProvider>),
    Unavailable,
}

impl From<Option<Arc<dyn TextProvider>>> for Upstream {
    fn from(provider: Option<Arc<dyn TextProvider>>) -> Self {
        provider.map_or(Upstream::Unavailable, Upstream::Available)
    }
}

/// Process-wide generator handles, built once and shared read-only.
#[derive(Clone)]
pub struct Generator {
    primary: Upstream,
    custom: Upstream,
}

impl Generator {
    pub fn new(
        primary: Option<Arc<dyn TextProvider>>,
        custom: Option<Arc<dyn TextProvider>>,
    ) -> Self {
        Self {
            primary: primary.into(),
            custom: custom.into(),
        }
    }

    /// Generator with every slot unavailable.
    pub fn disabled() -> Self {
        Self::new(None, None)
    }

    /// Initialize the slots from configuration. Failures are logged and leave
    /// the slot unavailable for the life of the process.
    pub async fn initialize(config: &MindtrackConfig) -> Self {
        let primary: Option<Arc<dyn TextProvider>> = if config.api_key_configured() {
            match GeminiTextProvider::new(GeminiConfig {
                api_key: config.google.api_key.clone(),
                model: config.models.text_model.clone(),
                api_base: config.google.api_base.clone(),
                timeout: config.upstream_timeout(),
            }) {
                Ok(provider) => {
                    tracing::info!(
                        model = %provider.model(),
                        "Initialized Gemini text provider"
                    );
                    let provider: Arc<dyn TextProvider> = Arc::new(provider);
                    Some(provider)
                }
                Err(e) => {
                    tracing::error!(error = %e, "Error initializing Gemini text provider");
                    None
                }
            }
        } else {
            tracing::warn!("GOOGLE_AI_API_KEY not set; tips and insights use fallback content");
            None
        };

        let custom: Option<Arc<dyn TextProvider>> = if config.local_model.enabled {
            match LocalModelProvider::load(LocalModelConfig {
                endpoint: config.local_model.endpoint.clone(),
                max_new_tokens: config.local_model.max_new_tokens,
                timeout: config.upstream_timeout(),
            })
            .await
            {
                Ok(provider) => {
                    let provider: Arc<dyn TextProvider> = Arc::new(provider);
                    Some(provider)
                }
                Err(e) => {
                    tracing::error!(
                        endpoint = %config.local_model.endpoint,
                        error = %e,
                        "Error loading local model"
                    );
                    None
                }
            }
        } else {
            None
        };

        Self::new(primary, custom)
    }

    pub fn is_available(&self, slot: Slot) -> bool {
        matches!(self.upstream(slot), Upstream::Available(_))
    }

    /// Slot used for custom tips: the local model when loaded, Gemini otherwise.
    pub fn custom_route(&self) -> Slot {
        if self.is_available(Slot::Custom) {
            Slot::Custom
        } else {
            Slot::Primary
        }
    }

    /// Run `prompt` against the given slot.
    pub async fn generate(
        &self,
        slot: Slot,
        prompt: &str,
        params: &GenerationParams,
    ) -> GenerationOutcome {
        let provider = match self.upstream(slot) {
            Upstream::Available(provider) => provider,
            Upstream::Unavailable => return GenerationOutcome::Unavailable,
        };

        let start = Instant::now();
        let result = provider.generate(prompt, params).await.and_then(|response| {
            record_token_usage(provider.name(), response.input_tokens, response.output_tokens);
            tracing::debug!(
                provider = provider.name(),
                input_tokens = response.input_tokens,
                output_tokens = response.output_tokens,
                finish_reason = ?response.finish_reason,
                "Upstream usage"
            );
            if response.finish_reason == FinishReason::Length {
                tracing::warn!(
                    provider = provider.name(),
                    "Generation stopped at the token limit"
                );
            }
            response.into_text()
        });
        record_provider_call(provider.name(), start.elapsed(), result.is_ok());

        match result {
            Ok(text) => {
                tracing::info!(
                    provider = provider.name(),
                    length = text.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Generated content"
                );
                GenerationOutcome::Generated(text)
            }
            Err(e) => {
                tracing::error!(provider = provider.name(), error = %e, "Generation failed");
                GenerationOutcome::Failed(e.into())
            }
        }
    }

    fn upstream(&self, slot: Slot) -> &Upstream {
        match slot {
            Slot::Primary => &self.primary,
            Slot::Custom => &self.custom,
        }
    }
}
