use crate::models::{CustomTipRequest, CustomTipResponse, FailureResponse, WellbeingMetrics};
use crate::services::fallback::FALLBACK_TIPS;
use crate::services::metrics::record_generation;
use crate::services::prompts::custom_tip_prompt;
use crate::services::providers::{GenerationParams, ProviderError};
use crate::services::tips::first_tip;
use crate::services::{GenerationError, GenerationOutcome, Slot};
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// `POST /get_custom_tip`: a single tip from the fine-tuned model.
///
/// Falls back to Gemini when the local model is not loaded, and to a canned
/// tip when neither generator is available. Failures answer with 500.
pub async fn get_custom_tip(State(state): State<AppState>, body: Bytes) -> Response {
    let slot = state.generator.custom_route();

    match custom_tip(&state, slot, &body).await {
        Ok((response, mode)) => {
            record_generation("custom_tip", mode, true);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Error generating custom tip");
            record_generation("custom_tip", "error", false);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(FailureResponse {
                    success: false,
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Produce the tip together with the label of the path that served it.
async fn custom_tip(
    state: &AppState,
    slot: Slot,
    body: &[u8],
) -> Result<(CustomTipResponse, &'static str), GenerationError> {
    let request = CustomTipRequest::try_from(WellbeingMetrics::from_body(body)?)?;
    let prompt = custom_tip_prompt(&request);

    match state
        .generator
        .generate(slot, &prompt, &GenerationParams::default())
        .await
    {
        GenerationOutcome::Generated(text) => {
            let tip = first_tip(&text, &prompt).ok_or(ProviderError::EmptyResponse)?;
            let using_custom_model = slot == Slot::Custom;
            let mode = if using_custom_model { "custom" } else { "gemini" };
            Ok((
                CustomTipResponse {
                    success: true,
                    tip,
                    using_custom_model,
                },
                mode,
            ))
        }
        GenerationOutcome::Unavailable => {
            tracing::warn!("No generator available; returning canned tip");
            Ok((
                CustomTipResponse {
                    success: true,
                    tip: FALLBACK_TIPS[0].to_string(),
                    using_custom_model: false,
                },
                "fallback",
            ))
        }
        GenerationOutcome::Failed(e) => Err(e),
    }
}
