//! Mock provider implementation for testing.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone)]
enum Script {
    Text(String),
    Truncated(String),
    Empty,
    Fail(String),
}

/// Mock text provider returning a scripted answer.
pub struct MockTextProvider {
    script: Script,
    calls: AtomicUsize,
}

impl MockTextProvider {
    /// Always answer with `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::scripted(Script::Text(text.into()))
    }

    /// Answer with `text`, reporting that the token limit cut it short.
    pub fn truncated(text: impl Into<String>) -> Self {
        Self::scripted(Script::Truncated(text.into()))
    }

    /// Answer successfully but without any text.
    pub fn empty() -> Self {
        Self::scripted(Script::Empty)
    }

    /// Always fail with an API error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::scripted(Script::Fail(message.into()))
    }

    fn scripted(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `generate` calls received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn generate(
        &self,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let (text, finish_reason) = match &self.script {
            Script::Text(text) => (Some(text.clone()), FinishReason::Complete),
            Script::Truncated(text) => (Some(text.clone()), FinishReason::Length),
            Script::Empty => (None, FinishReason::Complete),
            Script::Fail(message) => return Err(ProviderError::ApiError(message.clone())),
        };

        Ok(ProviderResponse {
            output_tokens: text.as_ref().map_or(0, |t| t.len() as i32 / 4),
            text,
            input_tokens: prompt.len() as i32 / 4,
            finish_reason,
        })
    }
}
